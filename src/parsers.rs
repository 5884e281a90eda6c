#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::identity::{Identity, IdentityKind};

peg::parser! {
    /// grammars for the submission filenames produced by the course platform.
    pub grammar parser() for str {
        /// matches any sequence of 1 or more digits, returned verbatim
        rule digits() -> &'input str
            = $(['0'..='9']+)

        /// matches a name segment, which may be empty
        rule name() -> &'input str
            = $([^ '_']*)

        /// matches a name segment with at least one character
        rule nonempty_name() -> &'input str
            = $([^ '_']+)

        /// matches whatever is left of the filename, at least one character
        rule rest() -> &'input str
            = $([_]+)

        /// the group marker, in either language
        rule group_marker()
            = "Gruppe" / "Group"

        /// parses `h<digits>_<first>_<last>_<rest>`
        pub rule individual() -> Identity
            = "h" n:digits() "_" nonempty_name() "_" nonempty_name() "_" r:rest()
            { Identity::new(IdentityKind::Individual, n, r) }

        /// parses `Gruppe <digits>_<first>_<last>_<rest>`, names may be empty
        /// and the second name may be left out together with its separator
        pub rule group() -> Identity
            = group_marker() " " n:digits() "_" name() "_" name() "_" r:rest()
            { Identity::new(IdentityKind::Group, n, r) }
            / group_marker() " " n:digits() "_" name() "_" r:rest()
            { Identity::new(IdentityKind::Group, n, r) }
    }
}
