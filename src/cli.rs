use std::path::PathBuf;

use clap::Parser;

/// Compare llvm-libc micro-benchmark JSON results using benchstat.
///
/// Every argument starting with '-' is forwarded verbatim as a benchstat
/// flag (so clap's own help/version interception is disabled); every other
/// argument is a study JSON file, processed in the order given.
#[derive(Parser, Debug, Default)]
#[command(rename_all = "kebab-case", disable_help_flag = true, disable_version_flag = true)]
pub struct CliCfg {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
    // Split of `args`, populated by get_cli. Relative order is preserved
    // within each class.
    #[clap(skip)]
    pub flags: Vec<String>,
    #[clap(skip)]
    pub files: Vec<PathBuf>,
}

pub fn get_cli() -> CliCfg {
    let mut cfg = CliCfg::parse();
    split_args(&mut cfg);
    cfg
}

fn split_args(cfg: &mut CliCfg) {
    for arg in &cfg.args {
        if arg.starts_with('-') {
            cfg.flags.push(arg.clone());
        } else {
            cfg.files.push(PathBuf::from(arg));
        }
    }
}
