use crate::error::AppError;
use crate::models::Coordinate;

const PRECISION: f64 = 1e5;

fn malformed(reason: &str) -> AppError {
    AppError::Routing(format!("malformed route geometry: {}", reason))
}

fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, AppError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*index).ok_or_else(|| malformed("truncated input"))? as i64 - 63;
        if !(0..64).contains(&byte) || shift > 60 {
            return Err(malformed("invalid character"));
        }
        *index += 1;

        result |= (byte & 0x1f) << shift;
        shift += 5;

        if byte < 0x20 {
            break;
        }
    }

    Ok(if result & 1 != 0 { !(result >> 1) } else { result >> 1 })
}

/// Decode an encoded polyline (precision 5) into (lon, lat) points
pub fn decode_polyline(encoded: &str) -> Result<Vec<Coordinate>, AppError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    let mut points = Vec::new();

    while index < bytes.len() {
        lat += next_value(bytes, &mut index)?;
        lon += next_value(bytes, &mut index)?;

        let point = Coordinate::new(lon as f64 / PRECISION, lat as f64 / PRECISION)
            .ok_or_else(|| malformed("point out of range"))?;
        points.push(point);
    }

    Ok(points)
}
