use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Envelope used by read/create endpoints: `{ "data": ... }`.
#[derive(Serialize, Debug)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self { Self { data } }
}

/// Envelope used by update/delete endpoints: `{ "success": true }`.
#[derive(Serialize, Debug)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self { Self { success: true } }
}
