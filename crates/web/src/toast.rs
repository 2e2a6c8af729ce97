use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use checkout::prelude::{Notification, NotificationKind};
use leptos::prelude::*;

/// How long a toast stays up unless dismissed.
pub(crate) const TOAST_LIFETIME: Duration = Duration::from_secs(4);

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(0);

/// A notification on screen, tagged so a timer only removes the toast it was started for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub(crate) id: u64,
    pub(crate) notification: Notification,
}

impl Toast {
    pub(crate) fn new(notification: Notification) -> Self {
        Self {
            id: NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed),
            notification,
        }
    }
}

/// Remove the toast `id` if it is still the one shown.
pub(crate) fn expire(toast: RwSignal<Option<Toast>>, id: u64) {
    let still_shown =
        toast.with_untracked(|shown| shown.as_ref().is_some_and(|shown| shown.id == id));

    if still_shown {
        toast.set(None);
    }
}

fn toast_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "toast toast-success",
        NotificationKind::Error => "toast toast-error",
    }
}

/// Live region showing the latest notification until it expires or is dismissed.
#[component]
pub fn ToastRegion(toast: RwSignal<Option<Toast>>) -> impl IntoView {
    view! {
        <div class="toast-region" role="status" aria-live="polite" aria-atomic="true">
            {move || {
                toast
                    .get()
                    .map(|Toast { notification, .. }| {
                        view! {
                            <div class=toast_class(notification.kind)>
                                <p class="toast-title">{notification.title}</p>
                                <p class="toast-description">{notification.description}</p>
                                <button
                                    type="button"
                                    class="toast-dismiss"
                                    aria-label="Dismiss notification"
                                    on:click=move |_| toast.set(None)
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
