use crate::models::DocumentRecord;

/// Ordered in-memory copy of the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCache {
    records: Vec<DocumentRecord>,
    next_id: u32,
}

impl Default for DocumentCache {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl DocumentCache {
    pub fn replace_all(&mut self, records: Vec<DocumentRecord>) {
        self.next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        self.records = records;
    }

    /// Add a record under the next free id and return that id.
    pub fn append(&mut self, mut record: DocumentRecord) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        record.id = id;
        self.records.push(record);
        id
    }

    pub fn remove(&mut self, id: u32) -> Option<DocumentRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn all(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn find_by_id(&self, id: u32) -> Option<&DocumentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.next_id = 1;
    }
}
