//! Tabular projection of a motif graph.
//!
//! One row per motif edge, grouped by weak component:
//!
//! ```text
//! index | component | source | root/parent | weight | witnesses?
//! ```
//!
//! The target column is called `root` in root mode and `parent` in hop
//! mode. Rows are sorted by component, then `(source, target)`.

use std::io::Write;

use serde::Serialize;
use serde_json::{Map, Value as Json};

use crate::config::Mode;
use crate::graph::MotifGraph;
use crate::model::{ActorId, Witness};
use crate::Result;

/// One row of a [`MotifTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MotifRow {
    pub index: usize,
    pub component: usize,
    pub source: ActorId,
    pub target: ActorId,
    pub weight: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub witnesses: Option<Vec<Witness>>,
}

/// Flat relation of motif edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MotifTable {
    pub mode: Mode,
    pub verbose: bool,
    pub rows: Vec<MotifRow>,
}

impl MotifTable {
    pub fn from_graph(graph: &MotifGraph, mode: Mode, verbose: bool) -> Self {
        let components = graph.components();
        let mut rows: Vec<MotifRow> = graph
            .edges()
            .iter()
            .map(|e| MotifRow {
                index: 0,
                component: components.of(graph, &e.source).unwrap_or_default(),
                source: e.source.clone(),
                target: e.target.clone(),
                weight: e.weight,
                witnesses: if verbose { e.witnesses.clone() } else { None },
            })
            .collect();

        rows.sort_by(|a, b| {
            (a.component, &a.source, &a.target).cmp(&(b.component, &b.source, &b.target))
        });
        for (i, row) in rows.iter_mut().enumerate() {
            row.index = i;
        }

        Self { mode, verbose, rows }
    }

    /// Column names, in row order (the index column excluded).
    pub fn columns(&self) -> Vec<&'static str> {
        let mut cols = vec!["component", "source", self.mode.target_column(), "weight"];
        if self.verbose {
            cols.push("witnesses");
        }
        cols
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write one JSON object per row, keyed by [`MotifTable::columns`].
    pub fn write_json_lines(&self, writer: &mut dyn Write) -> Result<()> {
        for row in &self.rows {
            let json = Json::Object(self.row_object(row));
            serde_json::to_writer(&mut *writer, &json)?;
            writeln!(writer)?;
        }
        Ok(())
    }

    fn row_object(&self, row: &MotifRow) -> Map<String, Json> {
        let mut obj = Map::new();
        obj.insert("index".into(), Json::from(row.index));
        obj.insert("component".into(), Json::from(row.component));
        obj.insert("source".into(), Json::from(row.source.as_str()));
        obj.insert(self.mode.target_column().into(), Json::from(row.target.as_str()));
        obj.insert("weight".into(), Json::from(row.weight));
        if self.verbose {
            let witnesses: Vec<Json> = row
                .witnesses
                .iter()
                .flatten()
                .map(|w| Json::from(w.iter().map(|r| r.as_str()).collect::<Vec<_>>()))
                .collect();
            obj.insert("witnesses".into(), Json::Array(witnesses));
        }
        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MotifEdge;
    use smallvec::smallvec;

    fn e(source: &str, target: &str, weight: usize) -> MotifEdge {
        MotifEdge {
            source: source.into(),
            target: target.into(),
            weight,
            witnesses: Some(vec![smallvec!["r1".into(), "r2".into()]]),
        }
    }

    #[test]
    fn test_rows_sorted_by_component() {
        let g = MotifGraph::from_edges(vec![e("Z", "Y", 1), e("C", "A", 2), e("B", "A", 3)]);
        let t = MotifTable::from_graph(&g, Mode::Root, false);

        let keys: Vec<(usize, usize, &str)> = t
            .rows
            .iter()
            .map(|r| (r.index, r.component, r.source.as_str()))
            .collect();
        assert_eq!(keys, vec![(0, 0, "B"), (1, 0, "C"), (2, 1, "Z")]);
        assert!(t.rows.iter().all(|r| r.witnesses.is_none()));
    }

    #[test]
    fn test_columns_by_mode() {
        let g = MotifGraph::default();
        assert_eq!(
            MotifTable::from_graph(&g, Mode::Root, false).columns(),
            vec!["component", "source", "root", "weight"]
        );
        assert_eq!(
            MotifTable::from_graph(&g, Mode::Hop, true).columns(),
            vec!["component", "source", "parent", "weight", "witnesses"]
        );
    }

    #[test]
    fn test_json_lines() {
        let g = MotifGraph::from_edges(vec![e("B", "A", 1)]);
        let t = MotifTable::from_graph(&g, Mode::Hop, true);
        let mut out = Vec::new();
        t.write_json_lines(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        let parsed: Json = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(parsed["parent"], "A");
        assert_eq!(parsed["weight"], 1);
        assert_eq!(parsed["witnesses"][0][1], "r2");
    }
}
