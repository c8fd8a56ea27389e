use crate::EnvScope;

/// Where a resolved setting came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Source {
    Explicit,
    Environment,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: Source,
}

/// Resolves a setting from its scopes.
///
/// Priority is explicit parameter, then process environment, then default. An empty or
/// unparsable environment value is ignored, the latter with a warning.
pub fn resolve<T>(
    explicit: Option<T>,
    env: &EnvScope,
    key: &str,
    parse: impl FnOnce(&str) -> Option<T>,
    default: impl FnOnce() -> T,
) -> Resolved<T> {
    if let Some(value) = explicit {
        return Resolved {
            value,
            source: Source::Explicit,
        };
    }

    if let Some(raw) = env.get_nonempty(key) {
        match parse(raw) {
            Some(value) => {
                tracing::debug!(key, raw, "Setting taken from environment");
                return Resolved {
                    value,
                    source: Source::Environment,
                };
            }
            None => {
                tracing::warn!(key, raw, "Ignoring unrecognized environment value");
            }
        }
    }

    Resolved {
        value: default(),
        source: Source::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::truth::parse_flag;

    #[test]
    fn explicit_beats_environment() {
        let env: EnvScope = [("FLAG", "ON")].into_iter().collect();
        let r = resolve(Some(false), &env, "FLAG", parse_flag, || true);
        assert_eq!(r, Resolved { value: false, source: Source::Explicit });
    }

    #[test]
    fn environment_beats_default() {
        let env: EnvScope = [("FLAG", "ON")].into_iter().collect();
        let r = resolve(None, &env, "FLAG", parse_flag, || false);
        assert_eq!(r, Resolved { value: true, source: Source::Environment });
    }

    #[test]
    fn empty_and_garbage_fall_back_to_default() {
        let env: EnvScope = [("EMPTY", ""), ("GARBAGE", "sometimes")].into_iter().collect();
        let r = resolve(None, &env, "EMPTY", parse_flag, || false);
        assert_eq!(r.source, Source::Default);
        let r = resolve(None, &env, "GARBAGE", parse_flag, || false);
        assert_eq!(r, Resolved { value: false, source: Source::Default });
    }
}
