use hyper::http::{Error, Uri};

/// `<provider>/<query>/json/`, or `<provider>/json/` for an empty query.
/// The query is percent-encoded into a single path segment. A path prefix on
/// the provider (e.g. a proxy mounted at `/api`) is kept.
pub fn compose_lookup_uri(provider: &Uri, query: &str) -> Result<Uri, Error> {
    let prefix = provider.path().trim_end_matches('/');
    let path = if query.is_empty() {
        format!("{prefix}/json/")
    } else {
        format!("{prefix}/{}/json/", urlencoding::encode(query))
    };
    let mut builder = Uri::builder();
    if let Some(scheme) = provider.scheme() {
        builder = builder.scheme(scheme.clone());
    }
    if let Some(authority) = provider.authority() {
        builder = builder.authority(authority.clone());
    }
    builder.path_and_query(path).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_and_domains_are_interpolated_verbatim() {
        let provider: Uri = "https://ipapi.co".parse().unwrap();
        let uri = compose_lookup_uri(&provider, "8.8.8.8").unwrap();
        assert_eq!(uri.to_string(), "https://ipapi.co/8.8.8.8/json/");

        let uri = compose_lookup_uri(&provider, "example.com").unwrap();
        assert_eq!(uri.path(), "/example.com/json/");
    }

    #[test]
    fn empty_query_is_self_lookup() {
        let provider: Uri = "https://ipapi.co/".parse().unwrap();
        let uri = compose_lookup_uri(&provider, "").unwrap();
        assert_eq!(uri.to_string(), "https://ipapi.co/json/");
    }

    #[test]
    fn provider_prefix_is_kept() {
        let provider: Uri = "http://localhost:5173/api/".parse().unwrap();
        let uri = compose_lookup_uri(&provider, "1.1.1.1").unwrap();
        assert_eq!(uri.to_string(), "http://localhost:5173/api/1.1.1.1/json/");
        let uri = compose_lookup_uri(&provider, "").unwrap();
        assert_eq!(uri.path(), "/api/json/");
    }

    #[test]
    fn query_stays_in_one_segment() {
        let provider: Uri = "https://ipapi.co".parse().unwrap();
        let path = |query| compose_lookup_uri(&provider, query).unwrap().path().to_owned();
        assert_eq!(path("not an ip"), "/not%20an%20ip/json/");
        assert_eq!(path("8.8.8.8/country"), "/8.8.8.8%2Fcountry/json/");
        assert_eq!(path("x?y=1#z"), "/x%3Fy%3D1%23z/json/");
        assert_eq!(path("bücher.de"), "/b%C3%BCcher.de/json/");
        assert_eq!(path("2001:db8::1"), "/2001%3Adb8%3A%3A1/json/");
        let uri = compose_lookup_uri(&provider, "x?y=1").unwrap();
        assert_eq!(uri.query(), None);
    }
}
