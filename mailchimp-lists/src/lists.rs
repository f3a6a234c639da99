use crate::{
    endpoint::{self, Tokens},
    error::Error,
    models::{MailchimpMember, MembersPage},
    params::Parameters,
    transport::Transport,
};
use async_gen::gen;
use futures_core::Stream;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct PageSize(usize);

impl PageSize {
    /// Mailchimp caps `count` at 1000, anything above is clamped.
    pub fn new(size: usize) -> Self {
        Self(size.clamp(1, 1000))
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(100)
    }
}

/// The Mailchimp "Lists" resource group: lists, members, segments, merge
/// fields and interest categories.
///
/// Every operation takes optional parameters, sent as the query string for
/// reads and as the JSON body for writes, and returns the decoded response
/// as is.
///
/// ## Example
///
/// ```no_run
/// use mailchimp_lists::{Client, Lists, Parameters};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let lists = Lists::new(Client::from_api_key("abcd1234-us2")?);
///     let member = lists
///         .add_member(
///             "list-id",
///             "jane@example.com",
///             Some(Parameters::new().with("status", "subscribed")),
///         )
///         .await?;
///     println!("{member}");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Lists<T> {
    transport: T,
    page_size: PageSize,
}

impl<T: Transport> Lists<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            page_size: Default::default(),
        }
    }

    /// Sets the page size used by [`Lists::members_stream`].
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Gets information about all lists owned by the account.
    pub async fn get_lists(&self, params: Option<Parameters>) -> Result<Value, Error> {
        self.transport
            .request(&endpoint::GET_LISTS, &Tokens::new(), params.unwrap_or_default())
            .await
    }

    pub async fn get_list(
        &self,
        list_id: &str,
        params: Option<Parameters>,
    ) -> Result<Value, Error> {
        self.transport
            .request(&endpoint::GET_LIST, &Tokens::list(list_id), params.unwrap_or_default())
            .await
    }

    pub async fn get_interest_categories(
        &self,
        list_id: &str,
        params: Option<Parameters>,
    ) -> Result<Value, Error> {
        self.transport
            .request(
                &endpoint::GET_INTEREST_CATEGORIES,
                &Tokens::list(list_id),
                params.unwrap_or_default(),
            )
            .await
    }

    pub async fn get_merge_fields(
        &self,
        list_id: &str,
        params: Option<Parameters>,
    ) -> Result<Value, Error> {
        self.transport
            .request(
                &endpoint::GET_MERGE_FIELDS,
                &Tokens::list(list_id),
                params.unwrap_or_default(),
            )
            .await
    }

    /// Gets one page of list members. See [`Lists::members_stream`] to walk
    /// all of them.
    pub async fn get_members(
        &self,
        list_id: &str,
        params: Option<Parameters>,
    ) -> Result<Value, Error> {
        self.transport
            .request(
                &endpoint::GET_MEMBERS,
                &Tokens::list(list_id),
                params.unwrap_or_default(),
            )
            .await
    }

    pub async fn get_member_info(
        &self,
        list_id: &str,
        email: &str,
        params: Option<Parameters>,
    ) -> Result<Value, Error> {
        self.transport
            .request(
                &endpoint::GET_MEMBER,
                &Tokens::list(list_id).with_member(email),
                params.unwrap_or_default(),
            )
            .await
    }

    pub async fn get_member_activity(
        &self,
        list_id: &str,
        email: &str,
        params: Option<Parameters>,
    ) -> Result<Value, Error> {
        self.transport
            .request(
                &endpoint::GET_MEMBER_ACTIVITY,
                &Tokens::list(list_id).with_member(email),
                params.unwrap_or_default(),
            )
            .await
    }

    /// Adds a member to a list. `email` is sent as `email_address` unless
    /// `params` already carries one.
    pub async fn add_member(
        &self,
        list_id: &str,
        email: &str,
        params: Option<Parameters>,
    ) -> Result<Value, Error> {
        let params = params
            .unwrap_or_default()
            .fill_if_absent("email_address", email);
        self.transport
            .request(&endpoint::ADD_MEMBER, &Tokens::list(list_id), params)
            .await
    }

    pub async fn update_member(
        &self,
        list_id: &str,
        email: &str,
        params: Option<Parameters>,
    ) -> Result<Value, Error> {
        self.transport
            .request(
                &endpoint::UPDATE_MEMBER,
                &Tokens::list(list_id).with_member(email),
                params.unwrap_or_default(),
            )
            .await
    }

    pub async fn get_segments(
        &self,
        list_id: &str,
        params: Option<Parameters>,
    ) -> Result<Value, Error> {
        self.transport
            .request(
                &endpoint::GET_SEGMENTS,
                &Tokens::list(list_id),
                params.unwrap_or_default(),
            )
            .await
    }

    /// Adds a segment to a list. `name` is used unless `params` already
    /// carries one.
    pub async fn add_segment(
        &self,
        list_id: &str,
        name: &str,
        params: Option<Parameters>,
    ) -> Result<Value, Error> {
        let params = params.unwrap_or_default().fill_if_absent("name", name);
        self.transport
            .request(&endpoint::ADD_SEGMENT, &Tokens::list(list_id), params)
            .await
    }

    pub async fn update_segment(
        &self,
        list_id: &str,
        segment_id: u64,
        params: Option<Parameters>,
    ) -> Result<Value, Error> {
        self.transport
            .request(
                &endpoint::UPDATE_SEGMENT,
                &Tokens::list(list_id).with("segment_id", segment_id),
                params.unwrap_or_default(),
            )
            .await
    }

    /// Streams every member of a list, one page at a time.
    ///
    /// `params` (e.g. `status`) is forwarded on every page; `count` and
    /// `offset` are managed by the stream. The first error ends the stream.
    ///
    /// ## Example
    ///
    /// ```no_run
    /// use futures_util::StreamExt;
    /// use mailchimp_lists::{Client, Lists, Parameters};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let lists = Lists::new(Client::from_api_key("abcd1234-us2")?);
    ///     let params = Parameters::new().with("status", "unsubscribed");
    ///     let stream = lists.members_stream("list-id", Some(params));
    ///
    ///     stream
    ///         .for_each(|member| async move {
    ///             match member {
    ///                 Ok(member) => println!("{}", member.email_address),
    ///                 Err(err) => eprintln!("{err}"),
    ///             }
    ///         })
    ///         .await;
    ///
    ///     Ok(())
    /// }
    /// ```
    pub fn members_stream<'a>(
        &'a self,
        list_id: &'a str,
        params: Option<Parameters>,
    ) -> impl Stream<Item = Result<MailchimpMember, Error>> + 'a {
        let params = params.unwrap_or_default();
        let count = self.page_size.0;

        let g = gen! {
            let mut offset = 0;
            loop {
                let page_params = params
                    .clone()
                    .with("count", count)
                    .with("offset", offset);
                debug!(list_id, offset, count, "Fetching members page");

                let page = self
                    .get_members(list_id, Some(page_params))
                    .await
                    .and_then(|value| Ok(serde_json::from_value::<MembersPage>(value)?));
                let page = match page {
                    Ok(page) => page,
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                };

                if page.members.is_empty() {
                    break;
                }

                offset += page.members.len();
                for member in page.members.into_iter() {
                    yield Ok(member);
                }

                if page.total_items.is_some_and(|total| offset >= total) {
                    break;
                }
            }

            ()
        };

        g.into_async_iter()
    }
}
