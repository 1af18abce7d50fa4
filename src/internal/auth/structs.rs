pub mod upload_auth;
