// SPDX-License-Identifier: MIT

//! The launch pipeline: resolve, build policy, assemble, exec.
//!
//! A strictly linear one-shot sequence: Parsed, Resolved, Policy-Built,
//! Assembled, then Replaced. Any failure along the way is terminal. [`plan`]
//! covers everything short of the exec transition and is pure given its
//! inputs; [`launch`] captures the caller context, plans, and replaces the
//! process image.

pub mod error;
mod exec;
pub mod identity;
pub mod invocation;
pub mod request;

use std::convert::Infallible;

pub use error::LaunchError;
pub use identity::RealIdentity;
pub use invocation::{EXECUTOR, ExecutorInvocation};
pub use request::{CallerContext, LaunchRequest};

use crate::policy::IsolationPolicy;

/// Build the executor invocation for `request` without executing anything.
///
/// Pure given the snapshot in `ctx`: identical request and context always
/// assemble an identical argv. This is the observation seam; everything the
/// executor will be told is visible on the returned invocation.
pub fn plan(
    request: &LaunchRequest,
    ctx: &CallerContext,
) -> Result<ExecutorInvocation, LaunchError> {
    let target = invocation::resolve_target(request, ctx)?;
    tracing::debug!(target = %target.display(), "resolved target executable");
    let policy = IsolationPolicy::for_level(request.isolation, ctx.working_directory());
    let assembled = ExecutorInvocation::assemble(request, ctx, &policy, target);
    tracing::debug!(
        properties = policy.len(),
        env_vars = ctx.environment().len(),
        argv_len = assembled.argv().len(),
        "assembled executor invocation"
    );
    Ok(assembled)
}

/// Capture the caller context, plan, and replace this process with the
/// trusted executor. Returns only on failure.
pub fn launch(request: &LaunchRequest) -> Result<Infallible, LaunchError> {
    let ctx = CallerContext::capture()?;
    let assembled = plan(request, &ctx)?;
    exec::replace(&assembled)
}
