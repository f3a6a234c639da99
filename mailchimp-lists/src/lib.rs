//! A client for the "Lists" resource group of the Mailchimp Marketing API:
//! lists, members, segments, merge fields and interest categories.
//!
//! [`Lists`] exposes one method per endpoint and delegates the HTTP work to a
//! [`Transport`]. [`Client`] is the reqwest-based transport.
//!
//! ## Example
//!
//! ```no_run
//! use mailchimp_lists::{Client, Lists, Parameters};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let lists = Lists::new(Client::from_api_key("api-abcd1234-us2")?);
//!
//!     let member = lists.get_member_info("list-id", "Jane@Example.com", None).await?;
//!     println!("{}", member["status"]);
//!
//!     lists
//!         .update_member(
//!             "list-id",
//!             "jane@example.com",
//!             Some(Parameters::new().with("status", "unsubscribed")),
//!         )
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod lists;
pub mod models;
pub mod params;
pub mod subscriber;
pub mod transport;

pub use client::Client;
pub use config::ClientConfig;
pub use endpoint::{Endpoint, Method, Tokens};
pub use error::Error;
pub use lists::{Lists, PageSize};
pub use params::Parameters;
pub use subscriber::subscriber_hash;
pub use transport::Transport;
