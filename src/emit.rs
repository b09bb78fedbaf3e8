use std::fs::File;
use std::io::{self, Write};

use crate::merge::BenchSet;

// Line format consumed by benchstat's Go-benchmark parser. Fixed contract,
// do not touch: "Benchmark<name> 1 <ns> ns/op".
pub fn emit_benchset(set: &BenchSet, sink: &mut dyn Write) -> io::Result<()> {
    for b in &set.benchmarks {
        writeln!(sink, "Benchmark{} 1 {} ns/op", b.name, b.ns_per_op)?;
    }
    sink.flush()
}

/// Creates the pipe one emitter thread feeds benchstat through.
///
/// The read end is left inheritable so the child can open it as /dev/fd/N;
/// the write end gets FD_CLOEXEC so the child never holds a writer and the
/// stream reaches EOF as soon as the emitter drops its end. Both ends are
/// plain `File`s and close on drop, error paths included.
#[cfg(unix)]
pub fn inherited_pipe() -> io::Result<(File, File)> {
    use std::os::unix::io::{AsRawFd, FromRawFd};
    let mut fds = [0i32; 2];
    if unsafe { libc::pipe(fds.as_mut_ptr()) } == -1 {
        return Err(io::Error::last_os_error());
    }
    let (read, write) = unsafe { (File::from_raw_fd(fds[0]), File::from_raw_fd(fds[1])) };
    if unsafe { libc::fcntl(write.as_raw_fd(), libc::F_SETFD, libc::FD_CLOEXEC) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok((read, write))
}

#[cfg(not(unix))]
pub fn inherited_pipe() -> io::Result<(File, File)> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "feeding benchstat over /dev/fd requires a unix host",
    ))
}

/// Path benchstat uses to open the inherited read end.
#[cfg(unix)]
pub fn fd_path(read_end: &File) -> String {
    use std::os::unix::io::AsRawFd;
    format!("/dev/fd/{}", read_end.as_raw_fd())
}

#[cfg(not(unix))]
pub fn fd_path(_read_end: &File) -> String {
    String::new()
}
