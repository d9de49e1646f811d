/// A list of borrowed callbacks fired in subscription order.
#[derive(Clone)]
pub struct Event<'a, A: ?Sized> {
    subscribers: Vec<&'a (dyn Fn(&A) + Sync)>,
}

impl<'a, A: ?Sized> Event<'a, A> {
    pub fn new() -> Self {
        Event {
            subscribers: vec![],
        }
    }

    pub fn call(&self, arg: &A) {
        for f in &self.subscribers {
            f(arg);
        }
    }

    pub fn sub(&mut self, handler: &'a (dyn Fn(&A) + Sync)) {
        self.subscribers.push(handler);
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<'a, A: ?Sized> Default for Event<'a, A> {
    fn default() -> Self {
        Self::new()
    }
}
