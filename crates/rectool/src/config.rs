// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use rune_cfg::RuneConfig;

use rectool_core::{
    Bounds, Constraint, FixedRule, Precision, RectangleOptions, StaticHost, ToolRectangle,
};

use crate::paths;

/// Everything needed to stand up an editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct RectoolConfig {
    pub image_width: i32,
    pub image_height: i32,
    pub scale: (f64, f64),
    pub precision: Precision,
    pub force_narrow_mode: bool,
    pub drawables: Vec<Bounds>,
    /// Region the auto-shrink collaborator reports as non-empty.
    pub content: Option<Bounds>,
    pub options: RectangleOptions,
}

impl Default for RectoolConfig {
    fn default() -> Self {
        Self {
            image_width: 1920,
            image_height: 1080,
            scale: (1.0, 1.0),
            precision: Precision::Int,
            force_narrow_mode: false,
            drawables: Vec::new(),
            content: None,
            options: RectangleOptions::default(),
        }
    }
}

impl RectoolConfig {
    /// Command-line values win over the file.
    pub fn with_overrides(
        mut self,
        constraint: Option<Constraint>,
        precision: Option<Precision>,
        image: Option<(i32, i32)>,
    ) -> Self {
        if let Some(c) = constraint {
            self.options.constraint = c;
        }
        if let Some(p) = precision {
            self.precision = p;
        }
        if let Some((w, h)) = image {
            self.image_width = w;
            self.image_height = h;
        }
        self
    }

    pub fn host(&self) -> Result<StaticHost, String> {
        let mut host = StaticHost::new(self.image_width, self.image_height, self.scale)
            .map_err(|e| format!("invalid image: {e}"))?
            .with_drawables(self.drawables.clone());

        if let Some(content) = self.content {
            host = host.with_content(content);
        }

        Ok(host)
    }

    pub fn tool(&self) -> Result<ToolRectangle<StaticHost>, String> {
        let mut tool = ToolRectangle::new(self.host()?, self.options.clone())
            .map_err(|e| format!("invalid options: {e}"))?;

        tool.set_precision(self.precision);
        tool.set_force_narrow_mode(self.force_narrow_mode);

        Ok(tool)
    }
}

/// Load `path`, or the default config location when `None`.
///
/// A missing default file yields defaults; a missing explicit file is an
/// error.
pub fn load(path: Option<&Path>) -> Result<RectoolConfig, String> {
    let explicit = path.is_some();
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(paths::default_config_path);

    if !path.exists() {
        if explicit {
            return Err(format!("config file not found: {}", path.display()));
        }
        return Ok(RectoolConfig::default());
    }

    let rc = RuneConfig::from_file(&path).map_err(|e| format!("failed to read config: {e}"))?;

    let cfg = parse_config(&rc)?;
    cfg.options
        .validate()
        .map_err(|e| format!("config error: {e}"))?;

    Ok(cfg)
}

fn parse_config(rc: &RuneConfig) -> Result<RectoolConfig, String> {
    let mut cfg = RectoolConfig::default();

    if !rc.has("rectool") {
        return Ok(cfg);
    }

    if let Some(v) = read(rc, "image_width")? {
        cfg.image_width = at("image_width", parse_dimension(&v))?;
    }

    if let Some(v) = read(rc, "image_height")? {
        cfg.image_height = at("image_height", parse_dimension(&v))?;
    }

    if let Some(v) = read(rc, "scale")? {
        cfg.scale = at("scale", parse_scale(&v))?;
    }

    if let Some(v) = read(rc, "precision")? {
        cfg.precision = at("precision", parse_precision(&v))?;
    }

    if let Some(v) = read(rc, "force_narrow_mode")? {
        cfg.force_narrow_mode = at("force_narrow_mode", parse_bool(&v))?;
    }

    if let Some(v) = read(rc, "drawables")? {
        cfg.drawables = at("drawables", parse_drawables(&v))?;
    }

    if let Some(v) = read(rc, "content")? {
        cfg.content = Some(at("content", parse_bounds(&v))?);
    }

    let opts = &mut cfg.options;

    if let Some(v) = read(rc, "constraint")? {
        opts.constraint = at("constraint", parse_constraint(&v))?;
    }

    if let Some(v) = read(rc, "fixed_rule")? {
        match at("fixed_rule", parse_fixed_rule(&v))? {
            Some(rule) => {
                opts.fixed_rule = rule;
                opts.fixed_rule_active = true;
            }
            None => opts.fixed_rule_active = false,
        }
    }

    if let Some(v) = read(rc, "aspect")? {
        let (n, d) = at("aspect", parse_aspect(&v))?;
        opts.aspect_numerator = n;
        opts.aspect_denominator = d;
    }

    if let Some(v) = read(rc, "fixed_width")? {
        opts.desired_fixed_width = at("fixed_width", parse_number(&v))?;
    }

    if let Some(v) = read(rc, "fixed_height")? {
        opts.desired_fixed_height = at("fixed_height", parse_number(&v))?;
    }

    if let Some(v) = read(rc, "fixed_size")? {
        let (w, h) = at("fixed_size", parse_size(&v))?;
        opts.desired_fixed_size_width = w;
        opts.desired_fixed_size_height = h;
    }

    if let Some(v) = read(rc, "fixed_center")? {
        opts.fixed_center = at("fixed_center", parse_bool(&v))?;
    }

    Ok(cfg)
}

fn read(rc: &RuneConfig, key: &str) -> Result<Option<String>, String> {
    rc.get_optional::<String>(&format!("rectool.{key}"))
        .map_err(|e| format!("config error at rectool.{key}: {e}"))
}

fn at<T>(key: &str, parsed: Result<T, String>) -> Result<T, String> {
    parsed.map_err(|e| format!("config error at rectool.{key}: {e}"))
}

// ---------------------------------------------------------------------------
// value parsers (shared with the command line)
// ---------------------------------------------------------------------------

pub fn parse_number(s: &str) -> Result<f64, String> {
    let s = s.trim();
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("expected a number, got \"{s}\"")),
    }
}

fn parse_dimension(s: &str) -> Result<i32, String> {
    let s = s.trim();
    match s.parse::<i32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(format!("expected a positive integer, got \"{s}\"")),
    }
}

fn parse_integer(s: &str) -> Result<i32, String> {
    let s = s.trim();
    s.parse::<i32>()
        .map_err(|_| format!("expected an integer, got \"{s}\""))
}

pub fn parse_bool(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        other => Err(format!("expected true|false, got \"{other}\"")),
    }
}

pub fn parse_constraint(s: &str) -> Result<Constraint, String> {
    match s.trim().to_lowercase().as_str() {
        "none" => Ok(Constraint::None),
        "image" => Ok(Constraint::Image),
        "drawable" => Ok(Constraint::Drawable),
        other => Err(format!("expected none|image|drawable, got \"{other}\"")),
    }
}

pub fn parse_precision(s: &str) -> Result<Precision, String> {
    match s.trim().to_lowercase().as_str() {
        "int" => Ok(Precision::Int),
        "double" => Ok(Precision::Double),
        other => Err(format!("expected int|double, got \"{other}\"")),
    }
}

/// `off` disables the rule.
pub fn parse_fixed_rule(s: &str) -> Result<Option<FixedRule>, String> {
    match s.trim().to_lowercase().as_str() {
        "off" => Ok(None),
        "aspect" => Ok(Some(FixedRule::Aspect)),
        "width" => Ok(Some(FixedRule::Width)),
        "height" => Ok(Some(FixedRule::Height)),
        "size" => Ok(Some(FixedRule::Size)),
        other => Err(format!(
            "expected off|aspect|width|height|size, got \"{other}\""
        )),
    }
}

/// `N:D`
pub fn parse_aspect(s: &str) -> Result<(f64, f64), String> {
    let (n, d) = s
        .split_once(':')
        .ok_or_else(|| format!("expected N:D, got \"{}\"", s.trim()))?;
    Ok((parse_number(n)?, parse_number(d)?))
}

/// `WxH`
pub fn parse_size(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got \"{}\"", s.trim()))?;
    Ok((parse_number(w)?, parse_number(h)?))
}

/// `WxH` with positive integer parts.
pub fn parse_image_size(s: &str) -> Result<(i32, i32), String> {
    let (w, h) = s
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got \"{}\"", s.trim()))?;
    Ok((parse_dimension(w)?, parse_dimension(h)?))
}

/// `S` for both axes or `SX,SY`.
pub fn parse_scale(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = match s.split_once(',') {
        Some((x, y)) => (parse_number(x)?, parse_number(y)?),
        None => {
            let v = parse_number(s)?;
            (v, v)
        }
    };

    if x <= 0.0 || y <= 0.0 {
        return Err(format!("scale must be positive, got {x},{y}"));
    }
    Ok((x, y))
}

/// `x,y,w,h`
pub fn parse_bounds(s: &str) -> Result<Bounds, String> {
    let parts: Vec<&str> = s.split(',').collect();
    let [x, y, w, h] = parts.as_slice() else {
        return Err(format!("expected x,y,w,h, got \"{}\"", s.trim()));
    };

    Ok(Bounds::from_offset(
        parse_integer(x)?,
        parse_integer(y)?,
        parse_dimension(w)?,
        parse_dimension(h)?,
    ))
}

/// `x,y,w,h;x,y,w,h;...`
pub fn parse_drawables(s: &str) -> Result<Vec<Bounds>, String> {
    s.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_bounds)
        .collect()
}
