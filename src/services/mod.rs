pub mod favorites_service;
pub mod identity_service;
pub mod notify_service;
pub mod otp_service;
pub mod recovery_service;
pub mod session_service;
pub mod storage_service;
