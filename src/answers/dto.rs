use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateAnswerRequest {
    pub problem_id: i64,
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAnswerRequest {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_id_defaults_to_top_level() {
        let req: CreateAnswerRequest =
            serde_json::from_str(r#"{"problem_id": 7, "content": "use a hash map"}"#).unwrap();
        assert_eq!(req.problem_id, 7);
        assert_eq!(req.parent_id, None);
    }

    #[test]
    fn parent_id_round_trips() {
        let req: CreateAnswerRequest =
            serde_json::from_str(r#"{"problem_id": 7, "content": "agreed", "parent_id": 3}"#)
                .unwrap();
        assert_eq!(req.parent_id, Some(3));
    }
}
