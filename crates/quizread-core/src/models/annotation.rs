use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationRef {
    #[serde(rename = "annotationId")]
    pub annotation_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "annotationId")]
    pub annotation_id: String,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "keyIdeas", default)]
    pub key_ideas: String,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
}
