/// Longest account name GitHub accepts.
pub const MAX_USERNAME_LEN: usize = 39;

/// Characters that would change the meaning of the request path.
const USERNAME_BLACKLIST: &str = "/?#%\\";

pub fn is_str_valid_length(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.chars().count())
}

pub fn is_str_valid_pattern(value: &str, blacklist: &str) -> bool {
    value
        .chars()
        .all(|c| !c.is_whitespace() && !blacklist.contains(c))
}

pub fn is_valid_username(value: &str) -> bool {
    is_str_valid_length(value, 1, MAX_USERNAME_LEN)
        && is_str_valid_pattern(value, USERNAME_BLACKLIST)
}
