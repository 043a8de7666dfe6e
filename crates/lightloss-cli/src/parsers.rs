//! Parsing functions for command-line ROI coordinates.

/// Parse ROI string in format "x,y,width,height"
///
/// # Arguments
/// * `roi_str` - A string in format "x,y,width,height", pixel units
///
/// # Returns
/// A tuple of (x, y, width, height) as u32 values
pub fn parse_roi(roi_str: &str) -> Result<(u32, u32, u32, u32), String> {
    let parts: Vec<&str> = roi_str.split(',').collect();
    if parts.len() != 4 {
        return Err(format!(
            "ROI must be in format x,y,width,height, got: {}",
            roi_str
        ));
    }

    let x = parts[0]
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid x coordinate: {}", parts[0]))?;
    let y = parts[1]
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid y coordinate: {}", parts[1]))?;
    let width = parts[2]
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid width: {}", parts[2]))?;
    let height = parts[3]
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid height: {}", parts[3]))?;

    if width == 0 || height == 0 {
        return Err(format!(
            "ROI must have nonzero width and height, got {}x{}",
            width, height
        ));
    }

    Ok((x, y, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roi_valid() {
        assert_eq!(parse_roi("10,20,300,40"), Ok((10, 20, 300, 40)));
        assert_eq!(parse_roi(" 1 , 2 , 3 , 4 "), Ok((1, 2, 3, 4)));
    }

    #[test]
    fn test_parse_roi_wrong_arity() {
        assert!(parse_roi("10,20,30").is_err());
        assert!(parse_roi("10,20,30,40,50").is_err());
    }

    #[test]
    fn test_parse_roi_non_numeric() {
        let err = parse_roi("a,2,3,4").unwrap_err();
        assert!(err.contains("Invalid x coordinate"), "{}", err);
    }

    #[test]
    fn test_parse_roi_rejects_zero_size() {
        assert!(parse_roi("0,0,0,5").is_err());
        assert!(parse_roi("0,0,5,0").is_err());
    }
}
