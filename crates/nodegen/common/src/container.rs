// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Message containers
//!
//! A container owns its own diagnostics and exposes the containers nested below it, so a whole
//! node tree can be asked whether it is still fit for code generation.

use super::{Diagnostic, SourcePosition};
use tracing::debug;

/// An element of the node model that can carry diagnostics
pub trait MessageContainer {
    /// Qualified name used when rendering messages
    fn element_name(&self) -> String;

    /// Messages attached directly to this element
    fn messages(&self) -> &[Diagnostic];

    /// Mutable access to the messages of this element
    fn messages_mut(&mut self) -> &mut Vec<Diagnostic>;

    /// Source position of the element, if known
    fn position(&self) -> Option<&SourcePosition> {
        None
    }

    /// Containers nested below this one
    fn children(&self) -> Vec<&dyn MessageContainer> {
        Vec::new()
    }

    /// Attach an error to this element
    fn add_error(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        let diagnostic = Diagnostic::error(self.element_name(), message).at(self.position().cloned());
        debug!(element = %diagnostic.element, message = %diagnostic.message, "error recorded");
        self.messages_mut().push(diagnostic);
    }

    /// Attach a warning to this element
    fn add_warning(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        let diagnostic = Diagnostic::warning(self.element_name(), message).at(self.position().cloned());
        debug!(element = %diagnostic.element, message = %diagnostic.message, "warning recorded");
        self.messages_mut().push(diagnostic);
    }

    /// Whether this element or anything below it carries an error
    fn has_errors(&self) -> bool {
        self.messages().iter().any(Diagnostic::is_error) || self.children().iter().any(|child| child.has_errors())
    }

    /// Collect the messages of this element and every nested container, depth first
    fn collect_messages(&self, out: &mut Vec<Diagnostic>) {
        out.extend(self.messages().iter().cloned());
        for child in self.children() {
            child.collect_messages(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Leaf {
        messages: Vec<Diagnostic>,
    }

    impl MessageContainer for Leaf {
        fn element_name(&self) -> String {
            "leaf".to_string()
        }

        fn messages(&self) -> &[Diagnostic] {
            &self.messages
        }

        fn messages_mut(&mut self) -> &mut Vec<Diagnostic> {
            &mut self.messages
        }
    }

    struct Root {
        messages: Vec<Diagnostic>,
        leaves: Vec<Leaf>,
    }

    impl MessageContainer for Root {
        fn element_name(&self) -> String {
            "root".to_string()
        }

        fn messages(&self) -> &[Diagnostic] {
            &self.messages
        }

        fn messages_mut(&mut self) -> &mut Vec<Diagnostic> {
            &mut self.messages
        }

        fn position(&self) -> Option<&SourcePosition> {
            None
        }

        fn children(&self) -> Vec<&dyn MessageContainer> {
            self.leaves.iter().map(|leaf| leaf as &dyn MessageContainer).collect()
        }
    }

    #[test]
    fn test_errors_propagate_from_children() {
        let mut root = Root {
            messages: Vec::new(),
            leaves: vec![Leaf { messages: Vec::new() }, Leaf { messages: Vec::new() }],
        };
        assert!(!root.has_errors());

        root.leaves[1].add_warning("only a warning");
        assert!(!root.has_errors());

        root.leaves[1].add_error("broken");
        assert!(root.has_errors());

        let mut collected = Vec::new();
        root.collect_messages(&mut collected);
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[1].element, "leaf");
    }
}
