//! Side effects of shell actions
//!
//! The reducer only updates [`AppState`]. Actions that move the router or
//! reach the mounted page are carried out here, and their results are fed
//! back through the reducer.

use std::time::Instant;

use libgallery::{LinkClick, Router};

use crate::app::{reduce, Action, AppState};
use crate::views::{Page, PageCommand};

/// Carry out the side effects of `action` and return the updated state
pub async fn perform(
    router: &mut Router<dyn Page>,
    state: AppState,
    action: Action,
    now: Instant,
) -> AppState {
    match action {
        Action::FollowLink(click) => follow(router, state, &click, now).await,
        Action::Back => {
            if router.back().await {
                routed(router, state)
            } else {
                reduce(state, Action::SetStatus("No earlier page".to_string()))
            }
        }
        Action::Forward => {
            if router.forward().await {
                routed(router, state)
            } else {
                reduce(state, Action::SetStatus("No later page".to_string()))
            }
        }
        Action::Page(key) => {
            let command = match router.current_view_mut() {
                Some(page) => page.handle_key(key),
                None => PageCommand::None,
            };
            match command {
                PageCommand::None => state,
                PageCommand::Follow(click) => follow(router, state, &click, now).await,
                PageCommand::Status(message) => reduce(state, Action::SetStatus(message)),
            }
        }
        _ => state,
    }
}

/// Navigate for in-app links; anything else is shown as a banner
async fn follow(
    router: &mut Router<dyn Page>,
    state: AppState,
    click: &LinkClick,
    now: Instant,
) -> AppState {
    if router.follow_link(click).await {
        return routed(router, state);
    }

    tracing::info!(href = %click.href, "Link left to the outside world");
    reduce(
        state,
        Action::ShowBanner {
            message: format!("Open in a browser: {}", click.href),
            at: now,
        },
    )
}

fn routed(router: &Router<dyn Page>, state: AppState) -> AppState {
    reduce(state, Action::Routed(router.current_path().to_string()))
}
