/// Payload stored in the table. The id is metadata only; lookups compare `value`.
#[derive(Debug, Clone)]
pub struct Registry {
    value: usize,
    id: String,
}

impl Registry {
    pub fn new(value: usize, ids: &mut IdCounter) -> Self {
        Self {
            value,
            id: ids.next_id(),
        }
    }

    pub fn value(&self) -> usize {
        self.value
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl PartialEq for Registry {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Registry {}

/// Mints zero-padded, strictly increasing registry ids starting at `000000001`.
///
/// One counter is meant to live for a whole benchmark run so ids keep growing
/// across trials.
#[derive(Debug, Default, Clone)]
pub struct IdCounter {
    count: u64,
}

impl IdCounter {
    pub const WIDTH: usize = 9;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        self.count += 1;
        format!("{:0width$}", self.count, width = Self::WIDTH)
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.count
    }
}
