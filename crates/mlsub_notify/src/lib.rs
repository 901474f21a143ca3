pub mod channels;
pub mod dispatch;
pub mod escape;
pub mod render;

pub use channels::{TelegramNotifier, WebhookNotifier};
pub use dispatch::{
    dispatch, resolve_notifiers, ChannelSelector, DispatchOutcome, NotifyConfig,
};
pub use render::{Format, Markup, MessageRenderer, Style};

pub mod prelude {
    pub use crate::channels::{TelegramNotifier, WebhookNotifier};
    pub use crate::dispatch::{
        dispatch, resolve_notifiers, ChannelSelector, DispatchOutcome, NotifyConfig,
    };
    pub use crate::render::{Format, MessageRenderer, Style};
}
