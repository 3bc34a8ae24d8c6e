//! Feed line-oriented streams (stdin, child stdout/stderr) into a logger.

use std::io::{BufRead, BufReader, Read};
use std::sync::Arc;
use std::thread::JoinHandle;

use threadlog_core::{Level, Logger};

/// Read `reader` line by line on its own thread, logging each line at `level`.
/// The thread registers `thread_name` so the lines carry that label.
///
/// Bytes that are not UTF-8 are replaced rather than ending the stream; reading
/// stops at EOF or on an I/O error.
pub fn spawn_pipe_thread<R: Read + Send + 'static>(
    thread_name: &str,
    logger: Arc<Logger>,
    reader: R,
    level: Level,
) -> std::io::Result<JoinHandle<usize>> {
    let tname = thread_name.to_string();
    std::thread::Builder::new()
        .name(tname.clone())
        .spawn(move || {
            let label = logger.registry().assign(tname);
            let mut br = BufReader::new(reader);
            let mut buf = Vec::new();
            let mut n = 0;
            loop {
                buf.clear();
                match br.read_until(b'\n', &mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(_) => {}
                }
                let line = trim_line_end(&buf);
                logger.log(level, &String::from_utf8_lossy(line), None);
                n += 1;
            }
            label.release();
            n
        })
}

fn trim_line_end(buf: &[u8]) -> &[u8] {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    line.strip_suffix(b"\r").unwrap_or(line)
}
