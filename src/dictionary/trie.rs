//! Byte trie stored in a node arena.

/// A prefix trie over UTF-8 bytes mapping each key to an id.
///
/// Nodes live in one `Vec` and refer to each other by index; node 0 is the root.
#[derive(Clone, Debug)]
pub(crate) struct Trie {
    nodes: Vec<Node>,
}

#[derive(Clone, Debug, Default)]
struct Node {
    /// Outgoing edges sorted by byte.
    edges: Vec<(u8, u32)>,
    value: Option<u32>,
}

impl Node {
    #[inline]
    fn child(&self, byte: u8) -> Result<u32, usize> {
        self.edges
            .binary_search_by_key(&byte, |(b, _)| *b)
            .map(|i| self.edges[i].1)
    }
}

impl Trie {
    #[inline]
    pub fn new() -> Self {
        Trie {
            nodes: vec![Node::default()],
        }
    }

    /// Returns the id stored under `key`.
    #[inline]
    pub fn get(&self, key: &[u8]) -> Option<u32> {
        let mut node = 0u32;
        for byte in key {
            node = self.nodes[node as usize].child(*byte).ok()?;
        }
        self.nodes[node as usize].value
    }

    /// Stores `value` under `key` unless the key is already present.
    ///
    /// Returns the id now stored under `key`.
    pub fn get_or_insert(&mut self, key: &[u8], value: u32) -> u32 {
        let mut node = 0u32;
        for byte in key {
            node = match self.nodes[node as usize].child(*byte) {
                Ok(child) => child,
                Err(pos) => {
                    let child = self.nodes.len() as u32;
                    self.nodes.push(Node::default());
                    self.nodes[node as usize].edges.insert(pos, (*byte, child));
                    child
                }
            };
        }
        *self.nodes[node as usize].value.get_or_insert(value)
    }

    #[cfg(test)]
    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
