//! Shared test doubles: a scripted model client and stub library
//! collaborators.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use mediamuse::library::{LibraryLister, ProviderIdResolver};
use mediamuse::llm::{ChatMessage, Completion, ModelClient};
use mediamuse::models::{RawLibraryEntry, Section};
use mediamuse::MuseError;

/// Model client that replays scripted outcomes and records every call's
/// message sequence.
pub struct ScriptedModelClient {
    outcomes: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedModelClient {
    pub fn new(responses: &[&str]) -> Self {
        Self::with_outcomes(responses.iter().map(|r| Ok(r.to_string())).collect())
    }

    /// `Err` entries become transport errors.
    pub fn with_outcomes(outcomes: Vec<Result<String, String>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn messages_for_call(&self, index: usize) -> Vec<ChatMessage> {
        self.calls.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedModelClient {
    async fn complete(
        &self,
        _model: &str,
        messages: &[ChatMessage],
    ) -> Result<Completion, MuseError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        match self.outcomes.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(Completion { text }),
            Some(Err(message)) => Err(MuseError::Transport(message)),
            None => panic!("model called more times than scripted"),
        }
    }
}

/// Library lister over in-memory fixtures, with per-section failure
/// injection and a log of paging calls.
#[derive(Default)]
pub struct StubLister {
    pub sections: Vec<Section>,
    pub items: HashMap<String, Vec<RawLibraryEntry>>,
    pub failing_sections: HashSet<String>,
    pub fail_list_sections: bool,
    pub paging_calls: Mutex<Vec<(String, usize, usize)>>,
}

impl StubLister {
    pub fn with_section(mut self, id: &str, entries: Vec<RawLibraryEntry>) -> Self {
        self.sections.push(Section::new(id, None));
        self.items.insert(id.to_string(), entries);
        self
    }

    pub fn failing_section(mut self, id: &str) -> Self {
        self.sections.push(Section::new(id, None));
        self.failing_sections.insert(id.to_string());
        self
    }
}

#[async_trait]
impl LibraryLister for StubLister {
    async fn list_sections(&self) -> Result<Vec<Section>, MuseError> {
        if self.fail_list_sections {
            return Err(MuseError::Transport("connection refused".into()));
        }
        Ok(self.sections.clone())
    }

    async fn list_items(
        &self,
        section_id: &str,
        offset: usize,
        page_size: usize,
    ) -> Result<Vec<RawLibraryEntry>, MuseError> {
        self.paging_calls
            .lock()
            .unwrap()
            .push((section_id.to_string(), offset, page_size));
        if self.failing_sections.contains(section_id) {
            return Err(MuseError::Transport("request timed out".into()));
        }
        let all = self
            .items
            .get(section_id)
            .ok_or_else(|| MuseError::Library(format!("unknown section {section_id}")))?;
        let end = (offset + page_size).min(all.len());
        Ok(all.get(offset..end).unwrap_or_default().to_vec())
    }
}

/// Resolver over a fixed id map; unknown ids resolve to `None`, listed
/// ids can be made to fail.
#[derive(Default)]
pub struct StubResolver {
    pub ids: HashMap<String, String>,
    pub failing: HashSet<String>,
}

impl StubResolver {
    pub fn with_id(mut self, internal: &str, provider: &str) -> Self {
        self.ids.insert(internal.to_string(), provider.to_string());
        self
    }

    pub fn failing_for(mut self, internal: &str) -> Self {
        self.failing.insert(internal.to_string());
        self
    }
}

#[async_trait]
impl ProviderIdResolver for StubResolver {
    async fn resolve(&self, internal_id: &str) -> Result<Option<String>, MuseError> {
        if self.failing.contains(internal_id) {
            return Err(MuseError::Transport("lookup failed".into()));
        }
        Ok(self.ids.get(internal_id).cloned())
    }
}

/// Fixture builder for raw library entries.
pub fn entry(internal_id: &str, title: &str, year: Option<i32>, media_type: &str) -> RawLibraryEntry {
    RawLibraryEntry {
        internal_id: internal_id.to_string(),
        title: title.to_string(),
        year,
        media_type: media_type.to_string(),
    }
}
