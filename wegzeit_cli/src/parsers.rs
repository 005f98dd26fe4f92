use wegzeit_ors::profile::OrsProfile;

pub fn parse_profile(input: &str) -> Result<OrsProfile, String> {
    input.parse()
}
