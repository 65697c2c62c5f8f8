// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event Descriptors
//!
//! Events are the only resources allowed to act as trigger sources.

use serde::{Deserialize, Serialize};

use super::{ResourceId, ResourceKind, SystemId};
use crate::errors::GraphResult;

/// Driver payload for an HTTP event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub id: ResourceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Inbound HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpEvent {
    system_id: SystemId,
    config: HttpConfig,
}

impl HttpEvent {
    pub fn new(id: impl Into<String>) -> GraphResult<Self> {
        Ok(Self {
            system_id: SystemId::generate(),
            config: HttpConfig {
                id: ResourceId::new(id)?,
                method: None,
                path: None,
            },
        })
    }

    /// HTTP method the endpoint answers to (e.g. `GET`)
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.config.method = Some(method.into());
        self
    }

    /// Request path of the endpoint
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.config.path = Some(path.into());
        self
    }

    pub fn id(&self) -> &ResourceId {
        &self.config.id
    }

    pub fn system_id(&self) -> SystemId {
        self.system_id
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }
}

/// Driver payload for a topic event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicConfig {
    pub id: ResourceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Topic on a message broker
#[derive(Debug, Clone)]
pub struct TopicEvent {
    system_id: SystemId,
    config: TopicConfig,
}

impl TopicEvent {
    pub fn new(id: impl Into<String>) -> GraphResult<Self> {
        Ok(Self {
            system_id: SystemId::generate(),
            config: TopicConfig {
                id: ResourceId::new(id)?,
                broker: None,
                name: None,
            },
        })
    }

    /// Broker hosting the topic
    pub fn broker(mut self, broker: impl Into<String>) -> Self {
        self.config.broker = Some(broker.into());
        self
    }

    /// Topic name on the broker
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    pub fn id(&self) -> &ResourceId {
        &self.config.id
    }

    pub fn system_id(&self) -> SystemId {
        self.system_id
    }

    pub fn config(&self) -> &TopicConfig {
        &self.config
    }
}

/// Any event descriptor
#[derive(Debug, Clone)]
pub enum Event {
    Http(HttpEvent),
    Topic(TopicEvent),
}

impl Event {
    pub fn id(&self) -> &ResourceId {
        match self {
            Event::Http(e) => e.id(),
            Event::Topic(e) => e.id(),
        }
    }

    pub fn system_id(&self) -> SystemId {
        match self {
            Event::Http(e) => e.system_id(),
            Event::Topic(e) => e.system_id(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Event::Http(_) => ResourceKind::HttpEvent,
            Event::Topic(_) => ResourceKind::TopicEvent,
        }
    }

    /// Payload handed to `Driver::on_event`
    pub fn config(&self) -> EventConfig {
        match self {
            Event::Http(e) => EventConfig::Http(e.config().clone()),
            Event::Topic(e) => EventConfig::Topic(e.config().clone()),
        }
    }
}

impl From<HttpEvent> for Event {
    fn from(event: HttpEvent) -> Self {
        Event::Http(event)
    }
}

impl From<TopicEvent> for Event {
    fn from(event: TopicEvent) -> Self {
        Event::Topic(event)
    }
}

/// Driver payload for any event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventConfig {
    Http(HttpConfig),
    Topic(TopicConfig),
}

impl EventConfig {
    pub fn id(&self) -> &ResourceId {
        match self {
            EventConfig::Http(c) => &c.id,
            EventConfig::Topic(c) => &c.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_event_setters() {
        let event = HttpEvent::new("MyHttpEvent")
            .unwrap()
            .method("GET")
            .path("/event");

        assert_eq!(event.id().as_str(), "MyHttpEvent");
        assert_eq!(event.config().method.as_deref(), Some("GET"));
        assert_eq!(event.config().path.as_deref(), Some("/event"));
    }

    #[test]
    fn test_topic_event_setters() {
        let event = TopicEvent::new("Orders").unwrap().broker("kafka").name("orders");
        let event = Event::from(event);

        assert_eq!(event.kind(), ResourceKind::TopicEvent);
        assert!(event.kind().is_event());
        match event.config() {
            EventConfig::Topic(config) => {
                assert_eq!(config.broker.as_deref(), Some("kafka"));
                assert_eq!(config.name.as_deref(), Some("orders"));
            }
            other => panic!("unexpected config {:?}", other),
        }
    }

    #[test]
    fn test_event_config_is_tagged() {
        let event = Event::from(HttpEvent::new("Hook").unwrap().method("POST"));
        let json = serde_json::to_value(event.config()).unwrap();

        assert_eq!(json["type"], "http");
        assert_eq!(json["id"], "Hook");
        assert_eq!(json["method"], "POST");
        assert!(json.get("path").is_none());
    }

    #[test]
    fn test_invalid_event_ids() {
        assert!(HttpEvent::new("bad id").is_err());
        assert!(TopicEvent::new("").is_err());
    }
}
