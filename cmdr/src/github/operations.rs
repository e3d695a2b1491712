/*
 *   Copyright (c) 2025 R3BL LLC
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

//! The static table of GitHub REST operations the console knows about. Each entry maps a
//! `Service.Method` to an HTTP verb and a path template, and says where each parameter
//! goes: a `{placeholder}` in the path, the query string, or the JSON body.

use crate::GitHubError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl From<HttpVerb> for reqwest::Method {
    fn from(verb: HttpVerb) -> Self {
        match verb {
            HttpVerb::Get => reqwest::Method::GET,
            HttpVerb::Post => reqwest::Method::POST,
            HttpVerb::Put => reqwest::Method::PUT,
            HttpVerb::Patch => reqwest::Method::PATCH,
            HttpVerb::Delete => reqwest::Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub service: &'static str,
    pub method: &'static str,
    /// In call order.
    pub params: &'static [&'static str],
    pub verb: HttpVerb,
    /// Relative to the API base url, eg: `repos/{owner}/{repo}`.
    pub path: &'static str,
    pub query_params: &'static [&'static str],
    pub body_params: &'static [&'static str],
}

macro_rules! op {
    (
        $service:literal . $method:literal ( $($param:literal),* ) =>
        $verb:ident $path:literal
        $(, query: [$($query:literal),*])?
        $(, body: [$($body:literal),*])?
    ) => {
        Operation {
            service: $service,
            method: $method,
            params: &[$($param),*],
            verb: HttpVerb::$verb,
            path: $path,
            query_params: &[$($($query),*)?],
            body_params: &[$($($body),*)?],
        }
    };
}

pub static OPERATIONS: &[Operation] = &[
    // Users.
    op!("Users"."Get"("user") => Get "users/{user}"),
    op!("Users"."GetAuthenticated"() => Get "user"),
    op!("Users"."ListFollowers"("user") => Get "users/{user}/followers"),
    op!("Users"."ListFollowing"("user") => Get "users/{user}/following"),
    // Repositories.
    op!("Repositories"."Get"("owner", "repo") => Get "repos/{owner}/{repo}"),
    op!("Repositories"."List"("user") => Get "users/{user}/repos"),
    op!("Repositories"."ListBranches"("owner", "repo") => Get "repos/{owner}/{repo}/branches"),
    op!("Repositories"."ListTags"("owner", "repo") => Get "repos/{owner}/{repo}/tags"),
    op!("Repositories"."ListContributors"("owner", "repo") => Get "repos/{owner}/{repo}/contributors"),
    op!("Repositories"."ListLanguages"("owner", "repo") => Get "repos/{owner}/{repo}/languages"),
    op!("Repositories"."Create"("name", "description") => Post "user/repos", body: ["name", "description"]),
    // Issues.
    op!("Issues"."Get"("owner", "repo", "number") => Get "repos/{owner}/{repo}/issues/{number}"),
    op!("Issues"."List"("owner", "repo") => Get "repos/{owner}/{repo}/issues"),
    op!("Issues"."Create"("owner", "repo", "title", "body") => Post "repos/{owner}/{repo}/issues", body: ["title", "body"]),
    op!("Issues"."Edit"("owner", "repo", "number", "state") => Patch "repos/{owner}/{repo}/issues/{number}", body: ["state"]),
    op!("Issues"."ListComments"("owner", "repo", "number") => Get "repos/{owner}/{repo}/issues/{number}/comments"),
    op!("Issues"."CreateComment"("owner", "repo", "number", "body") => Post "repos/{owner}/{repo}/issues/{number}/comments", body: ["body"]),
    // Pull requests.
    op!("PullRequests"."Get"("owner", "repo", "number") => Get "repos/{owner}/{repo}/pulls/{number}"),
    op!("PullRequests"."List"("owner", "repo") => Get "repos/{owner}/{repo}/pulls"),
    op!("PullRequests"."ListCommits"("owner", "repo", "number") => Get "repos/{owner}/{repo}/pulls/{number}/commits"),
    // Gists.
    op!("Gists"."Get"("id") => Get "gists/{id}"),
    op!("Gists"."List"("user") => Get "users/{user}/gists"),
    // Organizations.
    op!("Organizations"."Get"("org") => Get "orgs/{org}"),
    op!("Organizations"."List"("user") => Get "users/{user}/orgs"),
    op!("Organizations"."ListMembers"("org") => Get "orgs/{org}/members"),
    // Activity.
    op!("Activity"."ListNotifications"() => Get "notifications"),
    op!("Activity"."ListStarred"("user") => Get "users/{user}/starred"),
    op!("Activity"."Star"("owner", "repo") => Put "user/starred/{owner}/{repo}"),
    op!("Activity"."Unstar"("owner", "repo") => Delete "user/starred/{owner}/{repo}"),
    // Search.
    op!("Search"."Repositories"("q") => Get "search/repositories", query: ["q"]),
    op!("Search"."Users"("q") => Get "search/users", query: ["q"]),
    op!("Search"."Issues"("q") => Get "search/issues", query: ["q"]),
];

impl Operation {
    /// `Service.Method(p1, p2)`.
    #[must_use]
    pub fn signature(&self) -> String {
        format!("{}.{}({})", self.service, self.method, self.params.join(", "))
    }

    /// # Errors
    ///
    /// Returns [`GitHubError::ArityMismatch`] if the number of `args` is wrong.
    pub fn check_arity(&self, args: &[String]) -> Result<(), GitHubError> {
        if args.len() == self.params.len() {
            return Ok(());
        }
        Err(GitHubError::ArityMismatch {
            signature: self.signature(),
            expected: self.params.len(),
            actual: args.len(),
        })
    }

    /// The argument bound to `param`, assuming the arity has been checked.
    #[must_use]
    pub fn arg_for<'a>(&self, param: &str, args: &'a [String]) -> Option<&'a str> {
        self.params
            .iter()
            .position(|it| *it == param)
            .and_then(|index| args.get(index))
            .map(String::as_str)
    }
}

/// Exact lookup on service and method.
///
/// # Errors
///
/// Returns [`GitHubError::UnknownOperation`] if there is no such entry.
pub fn find_operation(service: &str, method: &str) -> Result<&'static Operation, GitHubError> {
    OPERATIONS
        .iter()
        .find(|it| it.service == service && it.method == method)
        .ok_or_else(|| GitHubError::UnknownOperation {
            name: format!("{service}.{method}"),
        })
}

/// Completion candidates: for each service (in the order they first appear) its name,
/// then for each of its operations `Service.Method` and `Service.Method(p1, p2)`.
#[must_use]
pub fn completion_words() -> Vec<String> {
    let mut services: Vec<&str> = vec![];
    for operation in OPERATIONS {
        if !services.contains(&operation.service) {
            services.push(operation.service);
        }
    }

    let mut words = vec![];
    for service in services {
        words.push(service.to_string());
        for operation in OPERATIONS.iter().filter(|it| it.service == service) {
            words.push(format!("{}.{}", operation.service, operation.method));
            words.push(operation.signature());
        }
    }
    words
}
