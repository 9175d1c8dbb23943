//! Source map for bidirectional mapping between program bytes and source lines

/// Bidirectional mapping between binary and source locations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    /// Forward map: instruction byte range → source location
    /// Sorted by address for binary search
    address_to_source: Vec<(AddressRange, SourceLocation)>,

    /// Reverse map: source line → instruction byte range
    /// Sorted by line number for binary search
    source_to_address: Vec<(usize, AddressRange)>,
}

/// A location in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line index (0-indexed)
    pub line: usize,

    /// Column where instruction starts (0-indexed)
    pub column: usize,

    /// Length of instruction in source characters
    pub length: usize,
}

/// A range of instruction indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    /// Starting index (inclusive)
    pub start: u16,

    /// Ending index (exclusive)
    pub end: u16,
}

impl AddressRange {
    pub fn contains(&self, address: u16) -> bool {
        self.start <= address && address < self.end
    }
}

impl SourceMap {
    /// Create a new empty source map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the bytes in `range` were assembled from `location`
    pub fn add_mapping(&mut self, range: AddressRange, location: SourceLocation) {
        self.address_to_source.push((range, location));
        self.source_to_address.push((location.line, range));
    }

    /// Source location of the instruction covering `address`.
    ///
    /// Operand bytes map to the instruction they belong to.
    pub fn get_source_location(&self, address: u16) -> Option<SourceLocation> {
        let idx = self
            .address_to_source
            .partition_point(|(range, _)| range.start <= address);
        let (range, location) = self.address_to_source.get(idx.checked_sub(1)?)?;
        range.contains(address).then_some(*location)
    }

    /// Get address range for a given source line
    pub fn get_address_range(&self, line: usize) -> Option<AddressRange> {
        self.source_to_address
            .binary_search_by_key(&line, |(l, _)| *l)
            .ok()
            .map(|idx| self.source_to_address[idx].1)
    }

    /// Number of mapped instructions
    pub fn len(&self) -> usize {
        self.address_to_source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.address_to_source.is_empty()
    }

    /// Finalize the source map (sort for binary search)
    pub fn finalize(&mut self) {
        self.address_to_source.sort_by_key(|(range, _)| range.start);
        self.source_to_address.sort_by_key(|(line, _)| *line);
    }
}
