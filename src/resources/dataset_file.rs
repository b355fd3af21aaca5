/// S3 上触发本次流水线的数据文件，导出目标目录与其同桶同前缀
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFile {
    pub bucket: String,
    pub key: String,
}

impl DatasetFile {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    pub fn s3_url(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }
}
