//! Wire types for the ImplantHub REST API.
//!
//! The server is an external collaborator; everything in [`models`] mirrors its JSON
//! contract so that responses are validated by typed decoding at the client boundary.
//!
//! # API Structure
//!
//! - **Users** (`/users`): user directory
//! - **Templates** (`/templates/*`): phase/activity definitions used to seed checklists
//! - **Projects** (`/projects/*`): projects, their checklist, members and audit trail
//! - **Health** (`/health`): liveness

pub mod models;
