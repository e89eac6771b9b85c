/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io::BufRead;

use crate::record::StatusVisitor;
use crate::{StatusFormat, StatusParseError};

mod single;
use single::SingleParser;

mod multi_v1;
use multi_v1::MultiV1Parser;

mod multi_v2;
use multi_v2::MultiV2Parser;

/// Drives one parse pass over a status file.
///
/// The first line classifies the file (see [`StatusFormat::detect`]); the
/// matching parser then consumes the remaining lines and delivers derived
/// records to the visitor. A reader holds no state across passes, so
/// parsing the same file twice yields the same records both times.
pub struct StatusReader<R> {
    inner: R,
    line: String,
}

fn trim_line_end(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}

impl<R: BufRead> StatusReader<R> {
    pub fn new(inner: R) -> Self {
        StatusReader {
            inner,
            line: String::with_capacity(256),
        }
    }

    fn next_line(&mut self) -> Result<bool, StatusParseError> {
        self.line.clear();
        Ok(self.inner.read_line(&mut self.line)? > 0)
    }

    /// Run one full parse pass, returning the detected format on success.
    pub fn read_status<V: StatusVisitor>(
        &mut self,
        visitor: &mut V,
    ) -> Result<StatusFormat, StatusParseError> {
        if !self.next_line()? {
            // empty file, nothing to classify
            return Err(StatusParseError::UnrecognizedFormat);
        }
        let format = StatusFormat::detect(trim_line_end(&self.line))
            .ok_or(StatusParseError::UnrecognizedFormat)?;

        match format {
            StatusFormat::Single => self.read_single(visitor)?,
            StatusFormat::MultiV1 => self.read_multi_v1(visitor)?,
            StatusFormat::MultiV2 => self.read_multi_v2(visitor)?,
        }
        Ok(format)
    }

    fn read_single<V: StatusVisitor>(&mut self, visitor: &mut V) -> Result<(), StatusParseError> {
        let mut parser = SingleParser::default();
        while self.next_line()? {
            parser.feed_line(trim_line_end(&self.line));
        }
        parser.finish(visitor);
        Ok(())
    }

    fn read_multi_v1<V: StatusVisitor>(&mut self, visitor: &mut V) -> Result<(), StatusParseError> {
        let mut parser = MultiV1Parser::default();
        while self.next_line()? {
            if parser.feed_line(trim_line_end(&self.line), visitor) {
                break;
            }
        }
        parser.finish()
    }

    fn read_multi_v2<V: StatusVisitor>(&mut self, visitor: &mut V) -> Result<(), StatusParseError> {
        let mut parser = MultiV2Parser::default();
        while self.next_line()? {
            if parser.feed_line(trim_line_end(&self.line), visitor)? {
                break;
            }
        }
        parser.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{AggregateCounters, ClientRecord};
    use std::io::Cursor;

    #[derive(Default)]
    struct Collected {
        clients: Vec<(String, u64, u64)>,
        totals: Option<AggregateCounters>,
    }

    impl StatusVisitor for Collected {
        fn visit_client(&mut self, client: ClientRecord<'_>) {
            self.clients.push((
                client.common_name.to_string(),
                client.bytes_recv,
                client.bytes_sent,
            ));
        }

        fn visit_totals(&mut self, totals: &AggregateCounters) {
            self.totals = Some(*totals);
        }
    }

    fn parse(input: &str) -> (Result<StatusFormat, StatusParseError>, Collected) {
        let mut visitor = Collected::default();
        let r = StatusReader::new(Cursor::new(input)).read_status(&mut visitor);
        (r, visitor)
    }

    const V1_HEADER: &str =
        "Common Name,Real Address,Bytes Received,Bytes Sent,Connected Since\n";

    #[test]
    fn single_endpoint() {
        let input = "OpenVPN STATISTICS\n\
             Updated,Thu Jun 18 14:27:10 2020\n\
             TCP/UDP read bytes,1000\n\
             TCP/UDP write bytes,2000\n\
             TUN/TAP read bytes,1500\n\
             TUN/TAP write bytes,900\n\
             END\n";
        let (r, visitor) = parse(input);
        assert_eq!(r.unwrap(), StatusFormat::Single);

        let totals = visitor.totals.unwrap();
        assert_eq!((totals.link_rx, totals.link_tx), (1000, 2000));
        // "TUN/TAP read bytes" is tunnel tx, "write" is tunnel rx
        assert_eq!((totals.tun_rx, totals.tun_tx), (900, 1500));
        let (overhead_rx, overhead_tx) = totals.overhead();
        assert_eq!(overhead_rx, 1000u64.wrapping_sub(900));
        assert_eq!(overhead_tx, 500);
        assert!(visitor.clients.is_empty());
    }

    #[test]
    fn single_wrapped_overhead() {
        let input = "OpenVPN STATISTICS\n\
             TCP/UDP read bytes,1000\n\
             TCP/UDP write bytes,2000\n\
             TUN/TAP read bytes,900\n\
             TUN/TAP write bytes,1500\n";
        let (r, visitor) = parse(input);
        assert_eq!(r.unwrap(), StatusFormat::Single);

        let totals = visitor.totals.unwrap();
        let (overhead_rx, overhead_tx) = totals.overhead();
        // (1000 - 0) + 0 - 1500 wraps around
        assert_eq!(overhead_rx, 500u64.wrapping_neg());
        assert_eq!(overhead_tx, 1100);
    }

    #[test]
    fn single_title_only() {
        let (r, visitor) = parse("OpenVPN STATISTICS\n");
        assert_eq!(r.unwrap(), StatusFormat::Single);
        assert_eq!(visitor.totals.unwrap(), AggregateCounters::default());
    }

    #[test]
    fn multi_v1_clients() {
        let input = format!(
            "OpenVPN CLIENT LIST\n\
             Updated,Thu Jun 18 14:27:10 2020\n\
             {V1_HEADER}\
             clientA,1.2.3.4:49502,500,700,Thu Jun 18 14:20:00 2020\n\
             clientB,5.6.7.8:49503,1500,1700,Thu Jun 18 14:21:00 2020\n\
             ROUTING TABLE\n\
             ignored,after,routing,table,rows\n"
        );
        let (r, visitor) = parse(&input);
        assert_eq!(r.unwrap(), StatusFormat::MultiV1);
        assert_eq!(
            visitor.clients,
            [
                ("clientA".to_string(), 500, 700),
                ("clientB".to_string(), 1500, 1700),
            ]
        );
    }

    #[test]
    fn multi_v1_short_rows_ignored() {
        let input = format!(
            "OpenVPN CLIENT LIST\n\
             {V1_HEADER}\
             short,row\n\
             clientA,1.2.3.4,500,700\n\
             ROUTING TABLE\n"
        );
        let (r, visitor) = parse(&input);
        assert_eq!(r.unwrap(), StatusFormat::MultiV1);
        assert_eq!(visitor.clients, [("clientA".to_string(), 500, 700)]);
    }

    #[test]
    fn multi_v1_missing_header() {
        let (r, visitor) = parse("OpenVPN CLIENT LIST\nclientA,1.2.3.4,500,700\n");
        assert!(r.unwrap_err().is_unrecognized_format());
        assert!(visitor.clients.is_empty());

        // the section end marker without a header is a format error too
        let (r, _) = parse("OpenVPN CLIENT LIST\nROUTING TABLE\n");
        assert!(r.unwrap_err().is_unrecognized_format());
    }

    #[test]
    fn multi_v2_clients() {
        let input = "TITLE,OpenVPN 2.4.4 x86_64-pc-linux-gnu\n\
             TIME,Thu Jun 18 14:27:10 2020,1592483230\n\
             HEADER,CLIENT_LIST,Common Name,Real Address,Bytes Received,Bytes Sent\n\
             CLIENT_LIST,clientB,5.6.7.8,300,400\n\
             END\n";
        let (r, visitor) = parse(input);
        assert_eq!(r.unwrap(), StatusFormat::MultiV2);
        assert_eq!(visitor.clients, [("clientB".to_string(), 300, 400)]);
    }

    #[test]
    fn multi_v3_tab_delimited() {
        let input = "TITLE\tOpenVPN 2.4.4 x86_64-pc-linux-gnu\n\
             HEADER\tCLIENT_LIST\tCommon Name\tReal Address\tBytes Received\tBytes Sent\n\
             CLIENT_LIST\tclientC\t9.9.9.9\t11\t22\n\
             END\n";
        let (r, visitor) = parse(input);
        assert_eq!(r.unwrap(), StatusFormat::MultiV2);
        assert_eq!(visitor.clients, [("clientC".to_string(), 11, 22)]);
    }

    #[test]
    fn multi_v2_column_reorder() {
        // extra unknown columns and a shuffled order must not matter
        let input = "TITLE,OpenVPN 2.4.4\n\
             HEADER,CLIENT_LIST,Real Address,Bytes Sent,Username,Common Name,Bytes Received\n\
             CLIENT_LIST,1.2.3.4,400,alice,clientD,300\n\
             END\n";
        let (r, visitor) = parse(input);
        assert_eq!(r.unwrap(), StatusFormat::MultiV2);
        assert_eq!(visitor.clients, [("clientD".to_string(), 300, 400)]);
    }

    #[test]
    fn multi_v2_missing_column() {
        let input = "TITLE,OpenVPN 2.4.4\n\
             HEADER,CLIENT_LIST,Common Name,Real Address,Bytes Received\n\
             CLIENT_LIST,clientB,5.6.7.8,300\n";
        let (r, visitor) = parse(input);
        assert!(r.unwrap_err().is_unrecognized_format());
        assert!(visitor.clients.is_empty());
    }

    #[test]
    fn multi_v2_field_count_mismatch() {
        let header = "HEADER,CLIENT_LIST,Common Name,Real Address,Bytes Received,Bytes Sent\n";

        // one field short
        let input =
            format!("TITLE,x\n{header}CLIENT_LIST,clientA,1.2.3.4,300,400\nCLIENT_LIST,clientB,5.6.7.8,300\n");
        let (r, visitor) = parse(&input);
        match r.unwrap_err() {
            StatusParseError::FieldCountMismatch { expected, found } => {
                assert_eq!(expected, 5);
                assert_eq!(found, 4);
            }
            e => panic!("unexpected error {e}"),
        }
        // rows delivered before the mismatch stand
        assert_eq!(visitor.clients, [("clientA".to_string(), 300, 400)]);

        // one field extra
        let input = format!("TITLE,x\n{header}CLIENT_LIST,clientB,5.6.7.8,300,400,extra\n");
        let (r, visitor) = parse(&input);
        assert!(matches!(
            r.unwrap_err(),
            StatusParseError::FieldCountMismatch {
                expected: 5,
                found: 6
            }
        ));
        assert!(visitor.clients.is_empty());
    }

    #[test]
    fn multi_v2_empty_section() {
        let input = "TITLE,OpenVPN 2.4.4\n\
             HEADER,CLIENT_LIST,Common Name,Real Address,Bytes Received,Bytes Sent\n\
             END\n";
        let (r, visitor) = parse(input);
        assert_eq!(r.unwrap(), StatusFormat::MultiV2);
        assert!(visitor.clients.is_empty());
    }

    #[test]
    fn multi_v2_missing_header() {
        let (r, _) = parse("TITLE,OpenVPN 2.4.4\nTIME,now,0\n");
        assert!(r.unwrap_err().is_unrecognized_format());
    }

    #[test]
    fn unknown_title() {
        let (r, _) = parse("some random file\n");
        assert!(r.unwrap_err().is_unrecognized_format());
        let (r, _) = parse("");
        assert!(r.unwrap_err().is_unrecognized_format());
    }

    #[test]
    fn repeated_pass_is_identical() {
        let input = format!(
            "OpenVPN CLIENT LIST\n\
             {V1_HEADER}\
             clientA,1.2.3.4,500,700\n\
             ROUTING TABLE\n"
        );
        let (r1, v1) = parse(&input);
        let (r2, v2) = parse(&input);
        assert_eq!(r1.unwrap(), r2.unwrap());
        assert_eq!(v1.clients, v2.clients);
    }
}
