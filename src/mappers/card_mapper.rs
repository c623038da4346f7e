use crate::models::cards::{ExplorerViewModel, ProfileCard, RepositoryCard};
use crate::models::profile::Profile;
use crate::models::repository_entry::RepositoryEntry;
use crate::views::explorer_view::ExplorerView;

const NO_LOCATION: &str = "N/A";
const NO_DESCRIPTION: &str = "No description available";

/// Returns `value` unless it is missing or empty.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub fn to_profile_card(profile: &Profile) -> ProfileCard {
    let heading = non_empty(profile.name.as_deref()).unwrap_or(&profile.login);
    let avatar_fallback: String = profile
        .login
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default();

    ProfileCard {
        login: profile.login.clone(),
        heading: heading.to_string(),
        avatar_url: profile.avatar_url.clone(),
        avatar_fallback,
        html_url: profile.html_url.clone(),
        bio: profile.bio.clone().unwrap_or_default(),
        followers: format!("{} Followers", profile.followers),
        following: format!("{} Following", profile.following),
        location: non_empty(profile.location.as_deref())
            .unwrap_or(NO_LOCATION)
            .to_string(),
        public_repos: format!("{} Repos", profile.public_repos),
    }
}

pub fn to_repository_card(entry: &RepositoryEntry) -> RepositoryCard {
    RepositoryCard {
        id: entry.id,
        name: entry.name.clone(),
        html_url: entry.html_url.clone(),
        description: non_empty(entry.description.as_deref())
            .unwrap_or(NO_DESCRIPTION)
            .to_string(),
        stars: format!("{} Stars", entry.stargazers_count),
        forks: format!("{} Forks", entry.forks_count),
    }
}

pub fn to_view_model(view: &ExplorerView) -> ExplorerViewModel {
    ExplorerViewModel {
        username: view.username().to_string(),
        loading: view.is_loading(),
        error: view.error().map(str::to_string),
        profile: view.profile().map(to_profile_card),
        repositories: view.repositories().iter().map(to_repository_card).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_card_uses_name_when_present() {
        let card = to_profile_card(&Profile::dummy("octocat"));

        assert_eq!("octocat display", card.heading);
        assert_eq!("O", card.avatar_fallback);
        assert_eq!("Lisbon", card.location);
        assert_eq!("12 Followers", card.followers);
        assert_eq!("3 Following", card.following);
        assert_eq!("2 Repos", card.public_repos);
    }

    #[test]
    fn profile_card_falls_back_to_login_and_na() {
        let profile = Profile {
            name: Some(String::new()),
            location: Some(String::new()),
            bio: None,
            ..Profile::dummy("ferris")
        };

        let card = to_profile_card(&profile);

        assert_eq!("ferris", card.heading);
        assert_eq!("N/A", card.location);
        assert_eq!("", card.bio);
    }

    #[test]
    fn whitespace_name_is_kept_as_given() {
        let profile = Profile {
            name: Some(" ".to_string()),
            ..Profile::dummy("ferris")
        };

        assert_eq!(" ", to_profile_card(&profile).heading);
    }

    #[test]
    fn repository_card_fills_missing_description() {
        let card = to_repository_card(&RepositoryEntry::dummy(7, "tools"));

        assert_eq!("No description available", card.description);
        assert_eq!("5 Stars", card.stars);
        assert_eq!("1 Forks", card.forks);
    }

    #[test]
    fn repository_card_keeps_description() {
        let entry = RepositoryEntry {
            description: Some("A crate".to_string()),
            ..RepositoryEntry::dummy(7, "tools")
        };

        assert_eq!("A crate", to_repository_card(&entry).description);
    }
}
