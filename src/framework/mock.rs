//! # Mock Framework
//!
//! An expectation-driven stand-in for the external management clients.
//!
//! [`MockApi<N>`] implements both [`EntitiesApi`] and [`GroupableApi`]. Queue the calls you
//! expect with the `expect_*` builders, hand a clone to a collection, run the code under
//! test, then assert on [`MockApi::calls`] and call [`MockApi::verify`].
//!
//! # Example
//! ```ignore
//! let mock = MockApi::<ResourceGroupData>::new();
//! mock.expect_get("rg1").return_ok(group_record("rg1", "westus"));
//! mock.expect_create_or_update("rg1").return_echo();
//!
//! let groups = Groups::new(mock.clone());
//! groups.update("rg1").with_tag("env", "test").apply().await?;
//!
//! assert_eq!(mock.submitted()[0].location.as_deref(), Some("westus"));
//! mock.verify(); // Ensures all expectations were met
//! ```
//!
//! A call that does not match the next queued expectation panics, naming both.

use crate::clients::{ApiError, ApiResult, EntitiesApi, GroupableApi};
use crate::framework::native::NativeResource;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// One call received by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call<N> {
    List,
    ListAll,
    ListInGroup { group: String },
    Get { group: Option<String>, name: String },
    CreateOrUpdate { group: Option<String>, name: String, body: N },
    Delete { group: Option<String>, name: String },
}

/// How an expectation answers.
#[derive(Debug)]
enum Reply<T> {
    Value(ApiResult<T>),
    /// For create-or-update: the submitted body. For get: the last body submitted under the
    /// same name.
    Echo,
}

#[derive(Debug)]
enum Expectation<N> {
    List { response: ApiResult<Vec<N>> },
    ListAll { response: ApiResult<Vec<N>> },
    ListInGroup { group: String, response: ApiResult<Vec<N>> },
    Get { group: Option<String>, name: String, reply: Reply<N> },
    CreateOrUpdate { group: Option<String>, name: String, reply: Reply<N> },
    Delete { group: Option<String>, name: String, response: ApiResult<()> },
}

struct MockState<N> {
    expectations: VecDeque<Expectation<N>>,
    calls: Vec<Call<N>>,
}

/// A mock management client with expectation tracking.
///
/// Clones share the same queue and call log.
pub struct MockApi<N> {
    state: Arc<Mutex<MockState<N>>>,
}

impl<N> Clone for MockApi<N> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<N: NativeResource> Default for MockApi<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NativeResource> MockApi<N> {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                expectations: VecDeque::new(),
                calls: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState<N>> {
        self.state.lock().expect("mock state poisoned")
    }

    /// Expects a top-level `list`.
    pub fn expect_list(&self) -> ListExpectationBuilder<N> {
        ListExpectationBuilder {
            scope: ListScope::Entities,
            mock: self.clone(),
        }
    }

    /// Expects a `list_all` across every group.
    pub fn expect_list_all(&self) -> ListExpectationBuilder<N> {
        ListExpectationBuilder {
            scope: ListScope::All,
            mock: self.clone(),
        }
    }

    /// Expects a `list_in_group` for `group`.
    pub fn expect_list_in_group(&self, group: &str) -> ListExpectationBuilder<N> {
        ListExpectationBuilder {
            scope: ListScope::Group(group.to_string()),
            mock: self.clone(),
        }
    }

    /// Expects a top-level `get` by name.
    pub fn expect_get(&self, name: &str) -> GetExpectationBuilder<N> {
        GetExpectationBuilder {
            group: None,
            name: name.to_string(),
            mock: self.clone(),
        }
    }

    /// Expects a scoped `get`.
    pub fn expect_get_in_group(&self, group: &str, name: &str) -> GetExpectationBuilder<N> {
        GetExpectationBuilder {
            group: Some(group.to_string()),
            name: name.to_string(),
            mock: self.clone(),
        }
    }

    /// Expects a top-level `create_or_update`.
    pub fn expect_create_or_update(&self, name: &str) -> CreateOrUpdateExpectationBuilder<N> {
        CreateOrUpdateExpectationBuilder {
            group: None,
            name: name.to_string(),
            mock: self.clone(),
        }
    }

    /// Expects a scoped `create_or_update`.
    pub fn expect_create_or_update_in_group(
        &self,
        group: &str,
        name: &str,
    ) -> CreateOrUpdateExpectationBuilder<N> {
        CreateOrUpdateExpectationBuilder {
            group: Some(group.to_string()),
            name: name.to_string(),
            mock: self.clone(),
        }
    }

    /// Expects a top-level `delete`.
    pub fn expect_delete(&self, name: &str) -> DeleteExpectationBuilder<N> {
        DeleteExpectationBuilder {
            group: None,
            name: name.to_string(),
            mock: self.clone(),
        }
    }

    /// Expects a scoped `delete`.
    pub fn expect_delete_in_group(&self, group: &str, name: &str) -> DeleteExpectationBuilder<N> {
        DeleteExpectationBuilder {
            group: Some(group.to_string()),
            name: name.to_string(),
            mock: self.clone(),
        }
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<Call<N>> {
        self.lock().calls.clone()
    }

    /// The bodies of every create-or-update call received so far.
    pub fn submitted(&self) -> Vec<N> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::CreateOrUpdate { body, .. } => Some(body.clone()),
                _ => None,
            })
            .collect()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.lock();
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining, next: {:?}",
                state.expectations.len(),
                state.expectations.front()
            );
        }
    }

    fn push(&self, expectation: Expectation<N>) {
        self.lock().expectations.push_back(expectation);
    }

    /// Records `call` and pops the next expectation.
    fn next(&self, call: Call<N>) -> (Expectation<N>, Vec<Call<N>>) {
        let mut state = self.lock();
        state.calls.push(call.clone());
        match state.expectations.pop_front() {
            Some(expectation) => (expectation, state.calls.clone()),
            None => panic!("Unexpected call {:?}: no expectations left", call),
        }
    }

    fn respond_list(&self, call: Call<N>) -> ApiResult<Vec<N>> {
        let (expectation, _) = self.next(call.clone());
        match (&call, expectation) {
            (Call::List, Expectation::List { response }) => response,
            (Call::ListAll, Expectation::ListAll { response }) => response,
            (Call::ListInGroup { group }, Expectation::ListInGroup { group: expected, response })
                if *group == expected =>
            {
                response
            }
            (call, expectation) => mismatch(call, &expectation),
        }
    }

    fn respond_get(&self, group: Option<&str>, name: &str) -> ApiResult<N> {
        let call = Call::Get {
            group: group.map(str::to_string),
            name: name.to_string(),
        };
        let (expectation, history) = self.next(call.clone());
        match expectation {
            Expectation::Get {
                group: expected_group,
                name: expected_name,
                reply,
            } if expected_group.as_deref() == group && expected_name == name => match reply {
                Reply::Value(response) => response,
                Reply::Echo => last_submitted(&history, name)
                    .ok_or_else(|| ApiError::NotFound(name.to_string())),
            },
            expectation => mismatch(&call, &expectation),
        }
    }

    fn respond_create_or_update(&self, group: Option<&str>, name: &str, body: N) -> ApiResult<N> {
        let call = Call::CreateOrUpdate {
            group: group.map(str::to_string),
            name: name.to_string(),
            body: body.clone(),
        };
        let (expectation, _) = self.next(call.clone());
        match expectation {
            Expectation::CreateOrUpdate {
                group: expected_group,
                name: expected_name,
                reply,
            } if expected_group.as_deref() == group && expected_name == name => match reply {
                Reply::Value(response) => response,
                Reply::Echo => Ok(body),
            },
            expectation => mismatch(&call, &expectation),
        }
    }

    fn respond_delete(&self, group: Option<&str>, name: &str) -> ApiResult<()> {
        let call = Call::Delete {
            group: group.map(str::to_string),
            name: name.to_string(),
        };
        let (expectation, _) = self.next(call.clone());
        match expectation {
            Expectation::Delete {
                group: expected_group,
                name: expected_name,
                response,
            } if expected_group.as_deref() == group && expected_name == name => response,
            expectation => mismatch(&call, &expectation),
        }
    }
}

fn mismatch<N: std::fmt::Debug, T>(call: &Call<N>, expectation: &Expectation<N>) -> T {
    panic!(
        "Unexpected request or expectation mismatch: got {:?}, expected {:?}",
        call, expectation
    )
}

fn last_submitted<N: Clone>(history: &[Call<N>], name: &str) -> Option<N> {
    history.iter().rev().find_map(|call| match call {
        Call::CreateOrUpdate { name: submitted, body, .. } if submitted == name => Some(body.clone()),
        _ => None,
    })
}

#[async_trait]
impl<N: NativeResource> EntitiesApi for MockApi<N> {
    type Native = N;

    async fn list(&self) -> ApiResult<Vec<N>> {
        self.respond_list(Call::List)
    }

    async fn get(&self, name: &str) -> ApiResult<N> {
        self.respond_get(None, name)
    }

    async fn create_or_update(&self, name: &str, body: N) -> ApiResult<N> {
        self.respond_create_or_update(None, name, body)
    }

    async fn delete(&self, name: &str) -> ApiResult<()> {
        self.respond_delete(None, name)
    }
}

#[async_trait]
impl<N: NativeResource> GroupableApi for MockApi<N> {
    type Native = N;

    async fn list_all(&self) -> ApiResult<Vec<N>> {
        self.respond_list(Call::ListAll)
    }

    async fn list_in_group(&self, group: &str) -> ApiResult<Vec<N>> {
        self.respond_list(Call::ListInGroup {
            group: group.to_string(),
        })
    }

    async fn get(&self, group: &str, name: &str) -> ApiResult<N> {
        self.respond_get(Some(group), name)
    }

    async fn create_or_update(&self, group: &str, name: &str, body: N) -> ApiResult<N> {
        self.respond_create_or_update(Some(group), name, body)
    }

    async fn delete(&self, group: &str, name: &str) -> ApiResult<()> {
        self.respond_delete(Some(group), name)
    }
}

enum ListScope {
    Entities,
    All,
    Group(String),
}

/// Builder for listing expectations.
pub struct ListExpectationBuilder<N> {
    scope: ListScope,
    mock: MockApi<N>,
}

impl<N: NativeResource> ListExpectationBuilder<N> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, records: Vec<N>) {
        self.finish(Ok(records));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.finish(Err(error));
    }

    fn finish(self, response: ApiResult<Vec<N>>) {
        let expectation = match self.scope {
            ListScope::Entities => Expectation::List { response },
            ListScope::All => Expectation::ListAll { response },
            ListScope::Group(group) => Expectation::ListInGroup { group, response },
        };
        self.mock.push(expectation);
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<N> {
    group: Option<String>,
    name: String,
    mock: MockApi<N>,
}

impl<N: NativeResource> GetExpectationBuilder<N> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, record: N) {
        self.finish(Reply::Value(Ok(record)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.finish(Reply::Value(Err(error)));
    }

    /// Replies with the body most recently submitted under the same name, or not-found.
    pub fn return_echo(self) {
        self.finish(Reply::Echo);
    }

    fn finish(self, reply: Reply<N>) {
        self.mock.push(Expectation::Get {
            group: self.group,
            name: self.name,
            reply,
        });
    }
}

/// Builder for `create_or_update` expectations.
pub struct CreateOrUpdateExpectationBuilder<N> {
    group: Option<String>,
    name: String,
    mock: MockApi<N>,
}

impl<N: NativeResource> CreateOrUpdateExpectationBuilder<N> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, record: N) {
        self.finish(Reply::Value(Ok(record)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.finish(Reply::Value(Err(error)));
    }

    /// Replies with the submitted body unchanged.
    pub fn return_echo(self) {
        self.finish(Reply::Echo);
    }

    fn finish(self, reply: Reply<N>) {
        self.mock.push(Expectation::CreateOrUpdate {
            group: self.group,
            name: self.name,
            reply,
        });
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectationBuilder<N> {
    group: Option<String>,
    name: String,
    mock: MockApi<N>,
}

impl<N: NativeResource> DeleteExpectationBuilder<N> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self) {
        self.finish(Ok(()));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.finish(Err(error));
    }

    fn finish(self, response: ApiResult<()>) {
        self.mock.push(Expectation::Delete {
            group: self.group,
            name: self.name,
            response,
        });
    }
}
