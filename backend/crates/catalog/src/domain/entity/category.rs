use kernel::id::CategoryId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub category_id: CategoryId,
    pub name: String,
    pub slug: String,
}

impl Category {
    pub fn new(name: String, slug: String) -> Self {
        Self {
            category_id: CategoryId::new(),
            name: name.trim().to_string(),
            slug,
        }
    }
}
