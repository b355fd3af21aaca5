use std::fmt;

/// Amazon Forecast 资源生命周期状态
///
/// 除服务端返回的状态外，额外包含 `DoesNotExist`，表示期望的资源尚未创建（或已过期需要重建）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    DoesNotExist,
    Active,
    CreatePending,
    CreateInProgress,
    CreateFailed,
    CreateStopping,
    CreateStopped,
    DeletePending,
    DeleteInProgress,
    DeleteFailed,
    UpdatePending,
    UpdateInProgress,
    UpdateFailed,
}

/// 远端状态字符串的解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedStatus {
    Known(Status),
    Unknown(String),
}

impl Status {
    pub const ALL: [Status; 13] = [
        Status::DoesNotExist,
        Status::Active,
        Status::CreatePending,
        Status::CreateInProgress,
        Status::CreateFailed,
        Status::CreateStopping,
        Status::CreateStopped,
        Status::DeletePending,
        Status::DeleteInProgress,
        Status::DeleteFailed,
        Status::UpdatePending,
        Status::UpdateInProgress,
        Status::UpdateFailed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::DoesNotExist => "DOES_NOT_EXIST",
            Status::Active => "ACTIVE",
            Status::CreatePending => "CREATE_PENDING",
            Status::CreateInProgress => "CREATE_IN_PROGRESS",
            Status::CreateFailed => "CREATE_FAILED",
            Status::CreateStopping => "CREATE_STOPPING",
            Status::CreateStopped => "CREATE_STOPPED",
            Status::DeletePending => "DELETE_PENDING",
            Status::DeleteInProgress => "DELETE_IN_PROGRESS",
            Status::DeleteFailed => "DELETE_FAILED",
            Status::UpdatePending => "UPDATE_PENDING",
            Status::UpdateInProgress => "UPDATE_IN_PROGRESS",
            Status::UpdateFailed => "UPDATE_FAILED",
        }
    }

    /// 解析远端返回的状态字符串，未知值不会 panic
    pub fn parse(raw: &str) -> ParsedStatus {
        Self::ALL
            .iter()
            .find(|s| s.as_str() == raw)
            .map(|s| ParsedStatus::Known(*s))
            .unwrap_or_else(|| ParsedStatus::Unknown(raw.to_string()))
    }

    pub fn is_failed(&self) -> bool {
        matches!(
            self,
            Status::CreateFailed | Status::DeleteFailed | Status::UpdateFailed
        )
    }

    /// 服务端仍在处理中
    pub fn is_updating(&self) -> bool {
        matches!(
            self,
            Status::CreatePending
                | Status::CreateInProgress
                | Status::CreateStopping
                | Status::DeletePending
                | Status::DeleteInProgress
                | Status::UpdatePending
                | Status::UpdateInProgress
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
