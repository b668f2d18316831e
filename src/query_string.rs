use std::collections::HashMap;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    /// Number of batches to show, between 1 and `max_batches`
    pub fn get_batches(&self, max_batches: u32) -> u32 {
        let val = self.items.get("page")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1);
        val.clamp(1, max_batches.max(1))
    }
}
