//! Multi-document YAML splitting.
//!
//! [`DocumentStream`] reads a byte stream line by line and yields the raw
//! bytes of each YAML document. A line starting with `---` is a document
//! boundary when the rest of the line is blank or a comment; `--- value` is
//! kept as content. Chunks holding nothing but whitespace and comments are
//! not yielded, so an empty file produces no documents.

use std::io::{self, BufRead};

const SEPARATOR: &[u8] = b"---";

/// Forward-only iterator over the raw documents of a stream.
///
/// After the end of input or the first I/O error it yields `None` forever.
#[derive(Debug)]
pub struct DocumentStream<R> {
    reader: R,
    done: bool,
}

impl<R: BufRead> DocumentStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for DocumentStream<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut document = Vec::new();
        let mut line = Vec::new();
        loop {
            line.clear();
            match self.reader.read_until(b'\n', &mut line) {
                Ok(0) => {
                    self.done = true;
                    return (!is_blank(&document)).then_some(Ok(document));
                }
                Ok(_) if is_separator(&line) => {
                    if is_blank(&document) {
                        document.clear();
                        continue;
                    }
                    return Some(Ok(document));
                }
                Ok(_) => document.extend_from_slice(&line),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

fn is_separator(line: &[u8]) -> bool {
    match line.strip_prefix(SEPARATOR) {
        Some(rest) => {
            let rest = rest.trim_ascii();
            rest.is_empty() || rest.starts_with(b"#")
        }
        None => false,
    }
}

fn is_blank(document: &[u8]) -> bool {
    document.split(|b| *b == b'\n').all(|line| {
        let line = line.trim_ascii();
        line.is_empty() || line.starts_with(b"#")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn documents(input: &str) -> Vec<String> {
        DocumentStream::new(Cursor::new(input.as_bytes().to_vec()))
            .map(|doc| String::from_utf8(doc.unwrap()).unwrap())
            .collect()
    }

    #[test]
    fn test_single_document_without_separator() {
        assert_eq!(documents("a: 1\nb: 2\n"), vec!["a: 1\nb: 2\n"]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(documents("").is_empty());
        assert!(documents("\n\n# only a comment\n").is_empty());
    }

    #[test]
    fn test_splits_on_separator_lines() {
        let input = "a: 1\n---\nb: 2\n--- # trailing comment\nc: 3";
        assert_eq!(documents(input), vec!["a: 1\n", "b: 2\n", "c: 3"]);
    }

    #[test]
    fn test_leading_and_repeated_separators_are_skipped() {
        let input = "---\na: 1\n---\n---\n\n---\nb: 2\n---\n";
        assert_eq!(documents(input), vec!["a: 1\n", "b: 2\n"]);
    }

    #[test]
    fn test_separator_with_content_is_not_a_boundary() {
        let input = "--- a: 1\n---\nb: 2\n";
        assert_eq!(documents(input), vec!["--- a: 1\n", "b: 2\n"]);
    }

    #[test]
    fn test_indented_dashes_are_content() {
        let input = "a: |\n  ---\n  text\n";
        assert_eq!(documents(input), vec![input]);
    }

    #[test]
    fn test_crlf_separator() {
        let input = "a: 1\r\n---\r\nb: 2\r\n";
        assert_eq!(documents(input), vec!["a: 1\r\n", "b: 2\r\n"]);
    }

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::other("disk on fire"));
            }
            self.served = true;
            let data = b"a: 1\n---\n";
            buf[..data.len()].copy_from_slice(data);
            Ok(data.len())
        }
    }

    #[test]
    fn test_read_error_is_yielded_once() {
        let reader = io::BufReader::new(FailingReader { served: false });
        let mut stream = DocumentStream::new(reader);

        assert_eq!(stream.next().unwrap().unwrap(), b"a: 1\n");
        let err = stream.next().unwrap().unwrap_err();
        assert_eq!(err.to_string(), "disk on fire");
        assert!(stream.next().is_none());
    }
}
