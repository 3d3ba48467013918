pub trait MaybeSplitOnce {
    fn maybe_split_once(&self, split: char) -> (&str, Option<&str>);
}

impl MaybeSplitOnce for str {
    fn maybe_split_once(&self, split: char) -> (&str, Option<&str>) {
        match self.split_once(split) {
            Some((left, right)) => (left, Some(right)),
            None => (self, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_occurrence() {
        assert_eq!("a=b=c".maybe_split_once('='), ("a", Some("b=c")));
    }

    #[test]
    fn missing_separator() {
        assert_eq!("HttpOnly".maybe_split_once('='), ("HttpOnly", None));
    }

    #[test]
    fn empty_right_side() {
        assert_eq!("name=".maybe_split_once('='), ("name", Some("")));
    }
}
