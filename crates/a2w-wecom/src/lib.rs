//! WeCom group-bot webhook delivery.

pub mod wecom_outbound;

pub use wecom_outbound::{
    WecomDeliveryError, WecomDeliveryReceipt, WecomDeliveryReport, WecomOutboundConfig,
    WecomOutboundDispatcher, WECOM_ACK_BODY, WECOM_WEBHOOK_BASE,
};
