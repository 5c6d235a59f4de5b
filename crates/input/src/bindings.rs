use crate::action::{Action, MoveDirection};

/// A key press, already stripped of window-system detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Escape,
}

/// Map a key press to its action. Unbound keys map to `None`.
pub fn action_for(key: KeyInput) -> Option<Action> {
    match key {
        KeyInput::Escape => Some(Action::Exit),
        KeyInput::Char(c) => match c {
            'w' => Some(Action::Move(MoveDirection::Forward)),
            's' => Some(Action::Move(MoveDirection::Backward)),
            'a' => Some(Action::Move(MoveDirection::Left)),
            'd' => Some(Action::Move(MoveDirection::Right)),
            'f' => Some(Action::ToggleShader),
            'h' => Some(Action::Help),
            _ => None,
        },
    }
}

pub const HELP_TEXT: &str = "\
 ============== H E L P ==============

h\t\thelp menu
f\t\ttoggle diffuse / solid shading
w\t\tmove camera forward (-z)
s\t\tmove camera backward (+z)
a\t\tstrafe camera left (-x)
d\t\tstrafe camera right (+x)
Esc\t\tquit
drag left mouse to look around
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_keys() {
        assert_eq!(
            action_for(KeyInput::Char('w')),
            Some(Action::Move(MoveDirection::Forward))
        );
        assert_eq!(
            action_for(KeyInput::Char('s')),
            Some(Action::Move(MoveDirection::Backward))
        );
        assert_eq!(
            action_for(KeyInput::Char('a')),
            Some(Action::Move(MoveDirection::Left))
        );
        assert_eq!(
            action_for(KeyInput::Char('d')),
            Some(Action::Move(MoveDirection::Right))
        );
    }

    #[test]
    fn command_keys() {
        assert_eq!(action_for(KeyInput::Char('f')), Some(Action::ToggleShader));
        assert_eq!(action_for(KeyInput::Char('h')), Some(Action::Help));
        assert_eq!(action_for(KeyInput::Escape), Some(Action::Exit));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(action_for(KeyInput::Char('q')), None);
        assert_eq!(action_for(KeyInput::Char('W')), None);
    }

    #[test]
    fn help_lists_every_binding() {
        for key in ["h", "f", "w", "s", "a", "d", "Esc"] {
            assert!(HELP_TEXT.lines().any(|l| l.starts_with(key)), "missing {key}");
        }
    }
}
