//! Route labels for spans and metrics.

use uuid::Uuid;

/// The request path with UUID segments collapsed, so metric labels stay bounded.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segments_are_collapsed() {
        assert_eq!(
            route_label("/bookings/0190c3d2-7a4b-7c1e-9f00-3a1b2c3d4e5f/cancel"),
            "/bookings/{uuid}/cancel"
        );
        assert_eq!(route_label("/healthcheck"), "/healthcheck");
        assert_eq!(route_label("/"), "/");
    }
}
