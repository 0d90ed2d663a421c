//! Tabular report view over the current stream state.

use crate::flowsheet::Flowsheet;
use std::fmt;

/// One table row per stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamRow {
    pub name: String,
    /// [mol/s]
    pub flow: f64,
    /// [K]
    pub temperature: f64,
    /// [Pa]
    pub pressure: f64,
    pub composition: Vec<f64>,
}

/// Derived, read-only snapshot of all streams.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamTable {
    pub species: Vec<String>,
    pub rows: Vec<StreamRow>,
}

impl StreamTable {
    pub fn from_flowsheet(flowsheet: &Flowsheet) -> Self {
        let rows = flowsheet
            .streams()
            .iter()
            .map(|s| StreamRow {
                name: s.name.clone(),
                flow: s.flow,
                temperature: s.temperature,
                pressure: s.pressure,
                composition: s.composition.clone(),
            })
            .collect();
        Self {
            species: flowsheet.species().to_vec(),
            rows,
        }
    }

    pub fn row(&self, name: &str) -> Option<&StreamRow> {
        self.rows.iter().find(|r| r.name == name)
    }
}

impl fmt::Display for StreamTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_w = self
            .rows
            .iter()
            .map(|r| r.name.len())
            .chain(std::iter::once("stream".len()))
            .max()
            .unwrap_or(6);

        write!(
            f,
            "{:<name_w$}  {:>14}  {:>10}  {:>14}",
            "stream", "flow [mol/s]", "T [K]", "P [Pa]"
        )?;
        for sp in &self.species {
            write!(f, "  {:>10}", format!("z_{sp}"))?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(
                f,
                "{:<name_w$}  {:>14.6}  {:>10.3}  {:>14.1}",
                row.name, row.flow, row.temperature, row.pressure
            )?;
            for z in &row.composition {
                write!(f, "  {:>10.6}", z)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::Stream;

    #[test]
    fn table_has_one_row_per_stream() {
        let mut fs = Flowsheet::new(vec!["N2".into(), "O2".into()]);
        fs.add_stream(Stream::feed("feed-a", 10.0, vec![1.0, 0.0], 300.0, 1.0e5))
            .unwrap();
        fs.add_stream(Stream::new("product", 2)).unwrap();

        let table = StreamTable::from_flowsheet(&fs);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.row("feed-a").unwrap().flow, 10.0);

        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("z_N2") && lines[0].contains("z_O2"));
        assert!(lines[1].starts_with("feed-a"));
        assert!(lines[2].starts_with("product"));
    }
}
