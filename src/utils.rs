/// Extract the file name from a download URL, ignoring query string and fragment
pub fn get_filename_from_url(url: &str) -> String {
    url.split(['?', '#'])
        .next()
        .unwrap_or(url)
        .trim_end_matches('/')
        .split('/')
        .next_back()
        .filter(|name| !name.is_empty())
        .unwrap_or("download")
        .to_string()
}
