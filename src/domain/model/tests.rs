// Unit tests for domain models

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::domain::errors::*;
    use crate::domain::model::*;

    #[test]
    fn test_file_name_split_with_extension() {
        let name = FileName::split("foo-1bar-2baz.txt");
        assert_eq!(name.base, "foo-1bar-2baz");
        assert_eq!(name.extension, ".txt");
        assert_eq!(name.segments, vec!["foo", "1bar", "2baz"]);
    }

    #[test]
    fn test_file_name_split_strips_directory() {
        let name = FileName::split("some/dir/foo-bar.mp4");
        assert_eq!(name.base, "foo-bar");
        assert_eq!(name.extension, ".mp4");
    }

    #[test]
    fn test_file_name_split_without_extension() {
        let name = FileName::split("foo-bar");
        assert_eq!(name.base, "foo-bar");
        assert_eq!(name.extension, "");
        assert_eq!(name.bare_extension(), "");
    }

    #[test]
    fn test_file_name_split_uses_last_dot() {
        let name = FileName::split("foo.tar.gz");
        assert_eq!(name.base, "foo.tar");
        assert_eq!(name.extension, ".gz");
        assert_eq!(name.bare_extension(), "gz");
    }

    #[test]
    fn test_file_name_round_trip() {
        for original in ["foo.txt", "foo-bar-baz.mp4", "a--b.mkv", "-lead.txt", "plain"] {
            let name = FileName::split(original);
            assert_eq!(name.segments.join("-"), name.base);
            assert_eq!(FileName::join(&name.segments, &name.extension), original);
            assert_eq!(name.to_string(), original);
        }
    }

    #[test]
    fn test_file_name_join_empty() {
        assert_eq!(FileName::join(&[], ".txt"), ".txt");
    }

    #[test]
    fn test_rename_plan_dry_run_never_applies() {
        let plan = RenamePlan::new(PathBuf::from("a.txt"), PathBuf::from("b.txt"), true);
        assert!(!plan.apply);
        assert!(!plan.is_noop());
    }

    #[test]
    fn test_rename_plan_noop() {
        let plan = RenamePlan::new(PathBuf::from("a.txt"), PathBuf::from("a.txt"), false);
        assert!(!plan.apply);
        assert!(plan.is_noop());
    }

    #[test]
    fn test_rename_plan_display() {
        let plan = RenamePlan::new(PathBuf::from("a.txt"), PathBuf::from("b.txt"), false);
        assert!(plan.apply);
        assert_eq!(plan.to_string(), r#""a.txt" -> "b.txt""#);
    }

    #[test]
    fn test_rename_request_sibling_keeps_directory() {
        let request = RenameRequest::new("dir/foo.txt", RenameOptions::default());
        assert_eq!(request.file_name().unwrap(), "foo.txt");
        assert_eq!(request.sibling("bar.txt"), PathBuf::from("dir/bar.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_rename_request_rejects_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let target = PathBuf::from("dir").join(OsStr::from_bytes(b"foo-\xff.txt"));
        let request = RenameRequest::new(target, RenameOptions::default());
        assert!(matches!(request.file_name(), Err(DomainError::ParseFailed(_))));
    }

    #[test]
    fn test_dimensions_parse() {
        let dims = Dimensions::parse("320x240").unwrap();
        assert_eq!(dims, Dimensions { width: 320, height: 240 });
        assert_eq!(dims.to_string(), "320x240");
        assert_eq!(dims.area(), 76_800);
    }

    #[test]
    fn test_dimensions_parse_invalid() {
        assert!(matches!(Dimensions::parse("320"), Err(DomainError::ParseFailed(_))));
        assert!(matches!(Dimensions::parse("axb"), Err(DomainError::ParseFailed(_))));
        assert!(matches!(
            Dimensions::parse("0x240"),
            Err(DomainError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_video_info_dimensions() {
        let info = VideoInfo {
            width: 1920,
            height: 1080,
            ..Default::default()
        };
        assert_eq!(info.dimensions().unwrap().to_string(), "1920x1080");
        assert!(VideoInfo::default().dimensions().is_err());
    }
}
