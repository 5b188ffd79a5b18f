use std::io::{self, BufRead, Write};

use anyhow::Result;
use serde::Serialize;

use crate::backends::Backend;
use crate::model::ResultRow;

/// Version tag reported in every response envelope.
const VERSION: &str = "1.0.0";

/// One response line. Field order is part of the wire shape.
#[derive(Serialize)]
struct Response<'a> {
    backend: &'a str,
    version: &'a str,
    priority: u32,
    results: Vec<ResultRow>,
}

/// Serve one backend over stdin/stdout until end-of-stream: one query line
/// in, one flushed JSON line out. The prompt goes to stderr so stdout stays
/// pure protocol.
pub fn serve(backend: &impl Backend) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve_io(backend, &mut stdin.lock(), &mut stdout.lock())
}

fn serve_io(
    backend: &impl Backend,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    let mut line = String::new();
    loop {
        eprint!("> ");
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let query = chomp(&line);
        let response = Response {
            backend: backend.name(),
            version: VERSION,
            priority: backend.priority(),
            results: backend.search(query),
        };
        serde_json::to_writer(&mut *output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
    }
}

/// Drop one trailing newline, tolerating a CRLF ending.
fn chomp(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct Echo;

    impl Backend for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn priority(&self) -> u32 {
            1
        }

        fn search(&self, query: &str) -> Vec<ResultRow> {
            if query.is_empty() {
                return Vec::new();
            }
            vec![ResultRow {
                name: query.to_string(),
                description: None,
                exec: Some(format!("run {query}")),
                icon: None,
            }]
        }
    }

    fn transcript(input: &str) -> Vec<String> {
        let mut output = Vec::new();
        serve_io(&Echo, &mut Cursor::new(input), &mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn emits_one_envelope_per_query_line() {
        let lines = transcript("firefox\nterminal\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "{\"backend\":\"echo\",\"version\":\"1.0.0\",\"priority\":1,\
             \"results\":[{\"name\":\"firefox\",\"exec\":\"run firefox\"}]}"
        );
    }

    #[test]
    fn empty_lines_still_get_an_envelope() {
        let lines = transcript("\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            "{\"backend\":\"echo\",\"version\":\"1.0.0\",\"priority\":1,\"results\":[]}"
        );
    }

    #[test]
    fn end_of_stream_terminates_silently() {
        assert!(transcript("").is_empty());
    }

    #[test]
    fn missing_trailing_newline_is_tolerated() {
        let lines = transcript("firefox");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\"name\":\"firefox\""));
    }

    #[test]
    fn carriage_returns_are_stripped() {
        let lines = transcript("firefox\r\n");
        assert!(lines[0].contains("\"name\":\"firefox\""));
    }

    #[test]
    fn chomp_only_takes_one_line_ending() {
        assert_eq!(chomp("a\n"), "a");
        assert_eq!(chomp("a\r\n"), "a");
        assert_eq!(chomp("a"), "a");
        assert_eq!(chomp("\n"), "");
        assert_eq!(chomp("a\n\n"), "a\n");
    }
}
