//! The explicit session value threaded through the interpreter, replacing
//! the process-wide globals (`bases`, `currentBase`) `main.c` uses --
//! `spec.md` §9's "Global current-base" design note.

use crate::forward_base::Base;
use crate::registry::Registry;

/// Current-base handle plus the registry it's drawn from.
#[derive(Default)]
pub struct Session {
    registry: Registry,
    current_base: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// `NEW id`: selects `id` as current, creating it if it doesn't exist.
    pub fn new_base(&mut self, id: &str) {
        self.registry.add_base(id);
        self.current_base = Some(id.to_owned());
    }

    /// `DEL id`: removes `id`'s base. Returns whether it existed. Clears
    /// the current-base selection if it was `id`.
    pub fn del_base(&mut self, id: &str) -> bool {
        let existed = self.registry.del_base(id);
        if existed && self.current_base.as_deref() == Some(id) {
            self.current_base = None;
        }
        existed
    }

    pub fn current(&self) -> Option<&Base> {
        let id = self.current_base.as_deref()?;
        self.registry.get_base(id)
    }

    pub fn current_mut(&mut self) -> Option<&mut Base> {
        let id = self.current_base.as_deref()?.to_owned();
        self.registry.get_base_mut(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digit::Number;

    #[test]
    fn new_selects_and_creates() {
        let mut s = Session::new();
        s.new_base("A");
        assert!(s.current().is_some());
    }

    #[test]
    fn del_current_base_clears_selection() {
        let mut s = Session::new();
        s.new_base("A");
        assert!(s.del_base("A"));
        assert!(s.current().is_none());
    }

    #[test]
    fn del_unknown_base_reports_absence() {
        let mut s = Session::new();
        assert!(!s.del_base("A"));
    }

    #[test]
    fn switching_base_preserves_rules() {
        let mut s = Session::new();
        s.new_base("A");
        s.current_mut()
            .unwrap()
            .add(&Number::parse("1").unwrap(), &Number::parse("2").unwrap())
            .unwrap();
        s.new_base("B");
        assert!(s.current().unwrap().get(&Number::parse("1").unwrap()) == "1");
        s.new_base("A");
        assert_eq!(s.current().unwrap().get(&Number::parse("1").unwrap()), "2");
    }
}
