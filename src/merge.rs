use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::study::{short_name, Study, TypeLabeler};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// One synthetic benchmark line: derived name plus the measurement in ns.
#[derive(Debug, Clone, PartialEq)]
pub struct Benchmark {
    pub name: String,
    pub ns_per_op: f64,
}

/// All benchmarks accumulated for one study name, across every input file
/// that carries it. Becomes one labeled input stream for benchstat.
#[derive(Debug)]
pub struct BenchSet {
    pub name: String,
    pub benchmarks: Vec<Benchmark>,
}

/// Reads and decodes each file in order, merging studies by study name.
/// Sets come back in first-seen order; a study name appearing in several
/// files appends to its existing set. Any read or decode failure aborts
/// the whole pass.
pub fn merge_files(files: &[PathBuf]) -> Result<Vec<BenchSet>> {
    let mut sets: Vec<BenchSet> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();
    for path in files {
        let data = fs::read(path)
            .map_err(|err| format!("unable to read {}: {}", path.display(), err))?;
        let study: Study = serde_json::from_slice(&data)
            .map_err(|err| format!("failed to parse {}: {}", path.display(), err))?;
        store_study(&mut sets, &mut by_name, &study)
            .map_err(|err| format!("{}: {}", path.display(), err))?;
    }
    Ok(sets)
}

// Appends one study's derived benchmarks to its set, creating the set on
// first sight of the study name. Measurement order is the sweep-group
// assignment order, so the labeler runs over the sequence as-is.
fn store_study(
    sets: &mut Vec<BenchSet>,
    by_name: &mut HashMap<String, usize>,
    study: &Study,
) -> Result<()> {
    let idx = match by_name.get(&study.study_name) {
        Some(&idx) => idx,
        None => {
            by_name.insert(study.study_name.clone(), sets.len());
            sets.push(BenchSet { name: study.study_name.clone(), benchmarks: Vec::new() });
            sets.len() - 1
        }
    };
    let short = short_name(&study.configuration.function);
    let mut labeler = TypeLabeler::new(&study.configuration)?;
    let set = &mut sets[idx];
    set.benchmarks.reserve(study.measurements.len());
    for (i, sec) in study.measurements.iter().enumerate() {
        set.benchmarks.push(Benchmark {
            name: format!("{}/{}", short, labeler.label(i)),
            ns_per_op: sec * 1e9,
        });
    }
    Ok(())
}
