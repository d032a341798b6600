//! Integration tests: HTTP behaviour against a mock Gemini server and panel
//! behaviour against an in-process transport.

mod chat;
mod image;
mod mock_server;
mod panels;
