//! Quote-aware delimited-text row parser.
//!
//! Produces a lazy, restartable sequence of rows from raw text. Field
//! splitting is quote-aware: a delimiter inside a quoted span does not end a
//! field; quote characters only toggle the in-quotes mode and are not copied
//! into the field value. Malformed quoting never fails; fields accumulate
//! best-effort until end of line.

/// A lazy view over delimited text, yielding one row per input line.
///
/// The view borrows the input, so a fresh iterator can be created from the
/// same text any number of times via [`DelimitedRows::rows`].
///
/// Empty rows are yielded as-is; skipping them is the caller's decision.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedRows<'a> {
    input: &'a str,
    delimiter: char,
    quote: char,
}

impl<'a> DelimitedRows<'a> {
    /// Creates a view over `input` with the `,` delimiter and `"` quote.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            delimiter: ',',
            quote: '"',
        }
    }

    /// Overrides the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Returns a fresh iterator over the rows of the input.
    pub fn rows(&self) -> impl Iterator<Item = Vec<String>> + 'a {
        let delimiter = self.delimiter;
        let quote = self.quote;
        self.input
            .lines()
            .map(move |line| split_line(line.trim_end_matches('\r'), delimiter, quote))
    }
}

/// Splits one line into fields, honoring quoted spans.
fn split_line(line: &str, delimiter: char, quote: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == quote {
            in_quotes = !in_quotes;
        } else if ch == delimiter && !in_quotes {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(ch);
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<Vec<String>> {
        DelimitedRows::new(input).rows().collect()
    }

    #[test]
    fn splits_plain_fields() {
        let rows = parse("a,b,c");
        assert_eq!(rows, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn delimiter_inside_quotes_is_literal() {
        let rows = parse("\"Main, St\",CityA");
        assert_eq!(rows, vec![vec!["Main, St", "CityA"]]);
    }

    #[test]
    fn quotes_are_not_copied_into_fields() {
        let rows = parse("\"Widget\",10");
        assert_eq!(rows, vec![vec!["Widget", "10"]]);
    }

    #[test]
    fn unterminated_quote_accumulates_to_end_of_line() {
        // Malformed quoting is tolerated: everything after the opening
        // quote lands in one field.
        let rows = parse("a,\"b,c");
        assert_eq!(rows, vec![vec!["a", "b,c"]]);
    }

    #[test]
    fn empty_line_yields_single_empty_field() {
        let rows = parse("a,b\n\nc,d");
        assert_eq!(
            rows,
            vec![vec!["a", "b"], vec![""], vec!["c", "d"]]
        );
    }

    #[test]
    fn trailing_empty_field_is_kept() {
        let rows = parse("a,b,");
        assert_eq!(rows, vec![vec!["a", "b", ""]]);
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let rows = parse("a,b\r\nc,d\r\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn iterator_is_restartable() {
        let view = DelimitedRows::new("a,b\nc,d");
        let first: Vec<_> = view.rows().collect();
        let second: Vec<_> = view.rows().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn custom_delimiter() {
        let rows: Vec<_> = DelimitedRows::new("a;b;c")
            .with_delimiter(';')
            .rows()
            .collect();
        assert_eq!(rows, vec![vec!["a", "b", "c"]]);
    }
}
