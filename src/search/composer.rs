use crate::groups::Category;

pub const DEFAULT_INSTRUCTION: &str = "popular groups and active communities";

/// Turn the user's query and optional category into the instruction handed
/// to the backend. A non-blank query always wins over the category.
pub fn compose_instruction(query: &str, category: Option<Category>) -> String {
    let query = query.trim();
    if !query.is_empty() {
        return query.to_string();
    }
    match category {
        Some(c) => format!("groups in {}", c.label()),
        None => DEFAULT_INSTRUCTION.to_string(),
    }
}
