//! User (account owner) rule set.
//!
//! Tier 1: identity and access. Tier 2: operational readiness.

use onboard_core::{Domain, RunContext};

pub fn check_user(ctx: &mut RunContext) {
    if ctx.user.is_failed() {
        return;
    }
    let Some(user) = ctx.user.as_present().cloned() else {
        ctx.add_violation(Domain::User, "User data missing");
        return;
    };

    // Tier 1: identity and access
    if user.id.is_empty() {
        ctx.add_violation(Domain::User, "User id is required");
    }
    if user.username.is_empty() {
        ctx.add_violation(Domain::User, "User username is required");
    }
    if user.email.is_empty() {
        ctx.add_violation(Domain::User, "User email is required");
    }
    if !user.is_active {
        ctx.add_violation(Domain::User, "User is inactive");
    }
    if user.profile_id.is_empty() {
        ctx.add_violation(Domain::User, "User profile id is required");
    }
    // Portal users must be tied to an account.
    if user.is_portal_enabled && user.account_id.is_none() {
        ctx.add_violation(Domain::User, "Portal user must be associated with an account");
    }

    // Tier 2: operational readiness
    if user.first_name.is_none() || user.last_name.is_none() {
        ctx.add_warning(Domain::User, "User full name incomplete");
    }
    if user.title.is_none() {
        ctx.add_warning(Domain::User, "User title missing");
    }
    if user.department.is_none() {
        ctx.add_warning(Domain::User, "User department missing");
    }
    if user.timezone.is_none() {
        ctx.add_warning(Domain::User, "User timezone missing");
    }
    if user.manager_id.is_none() {
        ctx.add_warning(Domain::User, "User has no manager (escalation risk)");
    }
}
