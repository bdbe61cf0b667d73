//! Test data builders for creating test objects

use gitops_console::types::{DashboardEntry, PipelineNode};

/// Builder for creating test DashboardEntries
pub struct EntryBuilder {
    id: String,
    name: String,
    description: Option<String>,
    url: Option<String>,
}

impl EntryBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            url: None,
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn build(self) -> DashboardEntry {
        DashboardEntry {
            id: self.id,
            name: self.name,
            description: self.description,
            url: self.url,
        }
    }
}

/// `count` entries named "Dashboard 01".."Dashboard NN" with ids "1".."N"
pub fn numbered_entries(count: usize) -> Vec<DashboardEntry> {
    (1..=count)
        .map(|i| EntryBuilder::new(&i.to_string(), &format!("Dashboard {:02}", i)).build())
        .collect()
}

/// A straight chain `n0 -> n1 -> ... -> n{len-1}`
pub fn chain_topology(len: usize) -> Vec<PipelineNode> {
    (0..len)
        .map(|i| {
            let node = PipelineNode::new(format!("n{}", i), "function");
            if i + 1 < len {
                node.with_wires([[format!("n{}", i + 1)]])
            } else {
                node
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_builder() {
        let entry = EntryBuilder::new("7", "Grafana")
            .description("Metrics")
            .url("https://grafana.local")
            .build();

        assert_eq!(entry.id, "7");
        assert_eq!(entry.description.as_deref(), Some("Metrics"));
        assert_eq!(entry.url.as_deref(), Some("https://grafana.local"));
    }

    #[test]
    fn test_chain_topology() {
        let nodes = chain_topology(3);
        assert_eq!(nodes[0].wire_targets().collect::<Vec<_>>(), vec!["n1"]);
        assert!(nodes[2].wires.is_none());
    }
}
