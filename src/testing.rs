//! In-memory fakes for the DOM-facing traits, shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::AjaxError;
use crate::net::transport::{HttpReply, HttpRequest, Transport};
use crate::net::types::{ContentSlot, FormPayload, SubmitControl, SubmitTarget};
use crate::state::notify::{Fadeable, NoticeSurface, Notification};

// =============================================================
// Notifications
// =============================================================

#[derive(Default)]
pub struct FakeNode {
    pub attached: Cell<bool>,
    pub faded: Cell<bool>,
}

impl FakeNode {
    pub fn attached() -> Rc<Self> {
        let node = Self::default();
        node.attached.set(true);
        Rc::new(node)
    }
}

impl Fadeable for FakeNode {
    fn is_attached(&self) -> bool {
        self.attached.get()
    }

    fn begin_fade(&self, _fade_ms: u32) {
        self.faded.set(true);
    }

    fn detach(&self) {
        self.attached.set(false);
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    pub mounted: RefCell<Vec<(Notification, Rc<FakeNode>)>>,
    pub refuse: Cell<bool>,
}

impl RecordingSurface {
    pub fn notices(&self) -> Vec<Notification> {
        self.mounted.borrow().iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn node(&self, idx: usize) -> Rc<FakeNode> {
        Rc::clone(&self.mounted.borrow()[idx].1)
    }
}

impl NoticeSurface for RecordingSurface {
    fn mount(&self, notice: &Notification) -> Option<Rc<dyn Fadeable>> {
        if self.refuse.get() {
            return None;
        }
        let node = FakeNode::attached();
        self.mounted.borrow_mut().push((notice.clone(), Rc::clone(&node)));
        Some(node)
    }
}

// =============================================================
// Gateway
// =============================================================

#[derive(Default)]
pub struct FakeTransport {
    pub replies: RefCell<VecDeque<Result<HttpReply, AjaxError>>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn replying(reply: Result<HttpReply, AjaxError>) -> Self {
        let transport = Self::default();
        transport.replies.borrow_mut().push_back(reply);
        transport
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpReply, AjaxError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(AjaxError::Transport("no scripted reply".to_owned())))
    }
}

pub fn reply(status: u16, status_text: &str, body: &str) -> Result<HttpReply, AjaxError> {
    Ok(HttpReply { status, status_text: status_text.to_owned(), body: body.to_owned() })
}

pub struct FakeButton {
    pub label: RefCell<String>,
    pub disabled: Cell<bool>,
    pub history: RefCell<Vec<(String, bool)>>,
}

impl FakeButton {
    pub fn new(label: &str) -> Rc<Self> {
        Rc::new(Self { label: RefCell::new(label.to_owned()), disabled: Cell::new(false), history: RefCell::default() })
    }
}

impl SubmitControl for FakeButton {
    fn label(&self) -> String {
        self.label.borrow().clone()
    }

    fn set_label(&self, markup: &str) {
        *self.label.borrow_mut() = markup.to_owned();
        self.history.borrow_mut().push((markup.to_owned(), self.disabled.get()));
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }
}

pub struct FakeForm {
    pub payload: FormPayload,
    pub button: Option<Rc<FakeButton>>,
}

impl SubmitTarget for FakeForm {
    fn payload(&self) -> FormPayload {
        self.payload.clone()
    }

    fn submit_control(&self) -> Option<Rc<dyn SubmitControl>> {
        self.button.as_ref().map(|b| Rc::clone(b) as Rc<dyn SubmitControl>)
    }
}

#[derive(Default)]
pub struct FakeSlot {
    pub writes: RefCell<Vec<String>>,
}

impl FakeSlot {
    pub fn html(&self) -> String {
        self.writes.borrow().last().cloned().unwrap_or_default()
    }
}

impl ContentSlot for FakeSlot {
    fn set_html(&self, html: &str) {
        self.writes.borrow_mut().push(html.to_owned());
    }
}
