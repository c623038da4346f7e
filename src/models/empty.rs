use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Empty {}
