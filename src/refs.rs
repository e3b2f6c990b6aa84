use crate::error::RenderError;
use pdf_writer::Ref;
use std::collections::HashMap;

#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    Font(usize),
    CidFont(usize),
    ToUnicode(usize),
    FontDescriptor(usize),
    FontData(usize),
}

impl RefType {
    fn describe(&self) -> &'static str {
        match self {
            RefType::Catalog => "catalog",
            RefType::Info => "info",
            RefType::PageTree => "page tree",
            RefType::Page(_) => "page",
            RefType::ContentForPage(_) => "page content",
            RefType::Font(_) => "font",
            RefType::CidFont(_) => "CID font",
            RefType::ToUnicode(_) => "ToUnicode map",
            RefType::FontDescriptor(_) => "font descriptor",
            RefType::FontData(_) => "font data",
        }
    }
}

/// Hands out sequential object ids, remembering what each one was allocated for
pub struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    next_id: i32,
}

impl ObjectReferences {
    pub fn new() -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            next_id: 1,
        }
    }

    fn new_id(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    pub fn get(&self, ref_type: RefType) -> Result<Ref, RenderError> {
        self.refs
            .get(&ref_type)
            .copied()
            .ok_or(RenderError::MissingReference(ref_type.describe()))
    }

    pub fn allocate(&mut self, ref_type: RefType) -> Ref {
        let id = self.new_id();
        self.refs.insert(ref_type, id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_sequentially() {
        let mut refs = ObjectReferences::new();
        let catalog = refs.allocate(RefType::Catalog);
        let tree = refs.allocate(RefType::PageTree);
        assert_eq!(catalog, Ref::new(1));
        assert_eq!(tree, Ref::new(2));
        assert_eq!(refs.get(RefType::PageTree).unwrap(), tree);
    }

    #[test]
    fn unknown_reference_is_an_error() {
        let refs = ObjectReferences::new();
        assert!(matches!(
            refs.get(RefType::Page(0)),
            Err(RenderError::MissingReference("page"))
        ));
    }
}
