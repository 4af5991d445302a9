//! Functions for reading/writing sampled states in CSV format.
use crate::MechState;
pub use csv::Error;
use csv::{ReaderBuilder, Writer};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// One CSV record, nested coordinates are flattened.
#[derive(Serialize, Deserialize)]
struct Row {
    theta2: f64,
    ax: f64,
    ay: f64,
    bx: f64,
    by: f64,
    theta3: f64,
    theta4: f64,
    trans: f64,
    valid: bool,
}

/// Write states as CSV with a header line. Angles are in radians.
pub fn dump_csv<W>(w: W, states: &[MechState]) -> Result<(), Error>
where
    W: Write,
{
    let mut w = Writer::from_writer(w);
    for s in states {
        let MechState {
            a: [ax, ay],
            b: [bx, by],
            theta2,
            theta3,
            theta4,
            trans,
            valid,
            ..
        } = *s;
        w.serialize(Row {
            theta2,
            ax,
            ay,
            bx,
            by,
            theta3,
            theta4,
            trans,
            valid,
        })?;
    }
    w.flush()?;
    Ok(())
}

/// Read states written by [`dump_csv()`].
///
/// The pivots are rebuilt from the ground link length `l1`. Lines starting
/// with `#` are skipped.
pub fn parse_csv<R>(r: R, l1: f64) -> Result<Vec<MechState>, Error>
where
    R: Read,
{
    ReaderBuilder::new()
        .comment(Some(b'#'))
        .from_reader(r)
        .deserialize()
        .map(|row| {
            let Row {
                theta2,
                ax,
                ay,
                bx,
                by,
                theta3,
                theta4,
                trans,
                valid,
            } = row?;
            Ok(MechState {
                o2: [0., 0.],
                o4: [l1, 0.],
                a: [ax, ay],
                b: [bx, by],
                theta2,
                theta3,
                theta4,
                trans,
                valid,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FourBar;

    #[test]
    fn dump_then_parse() {
        let fb = FourBar::example();
        let states = fb.sweep(12);
        let mut buf = Vec::new();
        dump_csv(&mut buf, &states).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.starts_with("theta2,ax,ay,bx,by,theta3,theta4,trans,valid\n"));
        assert_eq!(s.lines().count(), 13);
        let parsed = parse_csv(s.as_bytes(), fb.l1()).unwrap();
        assert_eq!(parsed.len(), states.len());
        assert_eq!(parsed[3].valid, states[3].valid);
        assert!((parsed[3].b[0] - states[3].b[0]).abs() < 1e-9);
    }

    #[test]
    fn reject_malformed_row() {
        let s = "theta2,ax,ay,bx,by,theta3,theta4,trans,valid\n0,1,2,3\n";
        assert!(parse_csv(s.as_bytes(), 1.).is_err());
    }
}
