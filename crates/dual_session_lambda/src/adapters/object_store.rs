use aws_sdk_s3::primitives::ByteStream;

/// Readable object body handed from a read response straight into an upload.
///
/// The body is consumed lazily; nothing in the pipeline collects it.
#[derive(Debug)]
pub struct ObjectStream {
    pub body: ByteStream,
    pub content_length: Option<i64>,
    pub content_type: Option<String>,
}

impl ObjectStream {
    pub fn new(body: ByteStream, content_length: Option<i64>) -> Self {
        Self {
            body,
            content_length,
            content_type: None,
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let content_length = i64::try_from(bytes.len()).ok();
        Self::new(ByteStream::from(bytes), content_length)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub content_length: Option<i64>,
    pub e_tag: Option<String>,
}

/// Object operations bound to a single identity.
pub trait ObjectStore {
    fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), String>;

    fn get_object_stream(&self, bucket: &str, key: &str) -> Result<ObjectStream, String>;

    fn upload_stream(&self, bucket: &str, key: &str, stream: ObjectStream) -> Result<(), String>;

    /// Existence check only; content is not compared.
    fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectMetadata, String>;
}
