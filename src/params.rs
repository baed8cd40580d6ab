use std::collections::BTreeMap;

/// One handler parameter: type label and field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: String,
    pub name: String,
}

/// Orders an instruction's handler parameters by descending global bit
/// offset, so the most significant field comes first. Colliding offsets
/// deduplicate; the last insertion wins.
#[derive(Debug, Default)]
pub struct ParamOrder {
    by_offset: BTreeMap<usize, Param>,
}

impl ParamOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, global_offset: usize, param: Param) {
        self.by_offset.insert(global_offset, param);
    }

    pub fn into_ordered(self) -> Vec<Param> {
        self.by_offset.into_iter().rev().map(|(_, p)| p).collect()
    }
}
