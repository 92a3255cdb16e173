use std::path::Path;

/// IZIGo 1.6 renames, in priority order.
///
/// When two entries match at the same position the earlier one wins, so
/// longer names sharing a prefix (`swagger.ApiRef`) must come before the
/// shorter one (`swagger.Api`).
pub const UPGRADE_RULES: &[(&str, &str)] = &[
    ("izigo.AppName", "izigo.BConfig.AppName"),
    ("izigo.RunMode", "izigo.BConfig.RunMode"),
    ("izigo.RecoverPanic", "izigo.BConfig.RecoverPanic"),
    ("izigo.RouterCaseSensitive", "izigo.BConfig.RouterCaseSensitive"),
    ("izigo.IZIGoServerName", "izigo.BConfig.ServerName"),
    ("izigo.EnableGzip", "izigo.BConfig.EnableGzip"),
    ("izigo.ErrorsShow", "izigo.BConfig.EnableErrorsShow"),
    ("izigo.CopyRequestBody", "izigo.BConfig.CopyRequestBody"),
    ("izigo.MaxMemory", "izigo.BConfig.MaxMemory"),
    ("izigo.Graceful", "izigo.BConfig.Listen.Graceful"),
    ("izigo.HttpAddr", "izigo.BConfig.Listen.HTTPAddr"),
    ("izigo.HttpPort", "izigo.BConfig.Listen.HTTPPort"),
    ("izigo.ListenTCP4", "izigo.BConfig.Listen.ListenTCP4"),
    ("izigo.EnableHttpListen", "izigo.BConfig.Listen.EnableHTTP"),
    ("izigo.EnableHttpTLS", "izigo.BConfig.Listen.EnableHTTPS"),
    ("izigo.HttpsAddr", "izigo.BConfig.Listen.HTTPSAddr"),
    ("izigo.HttpsPort", "izigo.BConfig.Listen.HTTPSPort"),
    ("izigo.HttpCertFile", "izigo.BConfig.Listen.HTTPSCertFile"),
    ("izigo.HttpKeyFile", "izigo.BConfig.Listen.HTTPSKeyFile"),
    ("izigo.EnableAdmin", "izigo.BConfig.Listen.EnableAdmin"),
    ("izigo.AdminHttpAddr", "izigo.BConfig.Listen.AdminAddr"),
    ("izigo.AdminHttpPort", "izigo.BConfig.Listen.AdminPort"),
    ("izigo.UseFcgi", "izigo.BConfig.Listen.EnableFcgi"),
    ("izigo.HttpServerTimeOut", "izigo.BConfig.Listen.ServerTimeOut"),
    ("izigo.AutoRender", "izigo.BConfig.WebConfig.AutoRender"),
    ("izigo.ViewsPath", "izigo.BConfig.WebConfig.ViewsPath"),
    ("izigo.StaticDir", "izigo.BConfig.WebConfig.StaticDir"),
    ("izigo.StaticExtensionsToGzip", "izigo.BConfig.WebConfig.StaticExtensionsToGzip"),
    ("izigo.DirectoryIndex", "izigo.BConfig.WebConfig.DirectoryIndex"),
    ("izigo.FlashName", "izigo.BConfig.WebConfig.FlashName"),
    ("izigo.FlashSeperator", "izigo.BConfig.WebConfig.FlashSeparator"),
    ("izigo.EnableDocs", "izigo.BConfig.WebConfig.EnableDocs"),
    ("izigo.XSRFKEY", "izigo.BConfig.WebConfig.XSRFKey"),
    ("izigo.EnableXSRF", "izigo.BConfig.WebConfig.EnableXSRF"),
    ("izigo.XSRFExpire", "izigo.BConfig.WebConfig.XSRFExpire"),
    ("izigo.TemplateLeft", "izigo.BConfig.WebConfig.TemplateLeft"),
    ("izigo.TemplateRight", "izigo.BConfig.WebConfig.TemplateRight"),
    ("izigo.SessionOn", "izigo.BConfig.WebConfig.Session.SessionOn"),
    ("izigo.SessionProvider", "izigo.BConfig.WebConfig.Session.SessionProvider"),
    ("izigo.SessionName", "izigo.BConfig.WebConfig.Session.SessionName"),
    ("izigo.SessionGCMaxLifetime", "izigo.BConfig.WebConfig.Session.SessionGCMaxLifetime"),
    ("izigo.SessionSavePath", "izigo.BConfig.WebConfig.Session.SessionProviderConfig"),
    ("izigo.SessionCookieLifeTime", "izigo.BConfig.WebConfig.Session.SessionCookieLifeTime"),
    ("izigo.SessionAutoSetCookie", "izigo.BConfig.WebConfig.Session.SessionAutoSetCookie"),
    ("izigo.SessionDomain", "izigo.BConfig.WebConfig.Session.SessionDomain"),
    ("Ctx.Input.CopyBody(", "Ctx.Input.CopyBody(izigo.BConfig.MaxMemory"),
    (".UrlFor(", ".URLFor("),
    (".ServeJson(", ".ServeJSON("),
    (".ServeXml(", ".ServeXML("),
    (".ServeJsonp(", ".ServeJSONP("),
    (".XsrfToken(", ".XSRFToken("),
    (".CheckXsrfCookie(", ".CheckXSRFCookie("),
    (".XsrfFormHtml(", ".XSRFFormHTML("),
    ("izigo.UrlFor(", "izigo.URLFor("),
    ("izigo.GlobalDocApi", "izigo.GlobalDocAPI"),
    ("izigo.Errorhandler", "izigo.ErrorHandler"),
    ("Output.Jsonp(", "Output.JSONP("),
    ("Output.Json(", "Output.JSON("),
    ("Output.Xml(", "Output.XML("),
    ("Input.Uri()", "Input.URI()"),
    ("Input.Url()", "Input.URL()"),
    ("Input.AcceptsHtml()", "Input.AcceptsHTML()"),
    ("Input.AcceptsXml()", "Input.AcceptsXML()"),
    ("Input.AcceptsJson()", "Input.AcceptsJSON()"),
    ("Ctx.XsrfToken()", "Ctx.XSRFToken()"),
    ("Ctx.CheckXsrfCookie()", "Ctx.CheckXSRFCookie()"),
    ("session.SessionStore", "session.Store"),
    (".TplNames", ".TplName"),
    ("swagger.ApiRef", "swagger.APIRef"),
    ("swagger.ApiDeclaration", "swagger.APIDeclaration"),
    ("swagger.Api", "swagger.API"),
    ("swagger.ApiRef", "swagger.APIRef"),
    ("swagger.Infomation", "swagger.Information"),
    ("toolbox.UrlMap", "toolbox.URLMap"),
    ("logs.LoggerInterface", "logs.Logger"),
    ("Input.Request", "Input.Context.Request"),
    ("Input.Params)", "Input.Params())"),
    ("httplib.IZIGoHttpSettings", "httplib.IZIGoHTTPSettings"),
    ("httplib.IZIGoHttpRequest", "httplib.IZIGoHTTPRequest"),
    (".TlsClientConfig", ".TLSClientConfig"),
    (".JsonBody", ".JSONBody"),
    (".ToJson", ".ToJSON"),
    (".ToXml", ".ToXML"),
    ("izigo.Html2str", "izigo.HTML2str"),
    ("izigo.AssetsCss", "izigo.AssetsCSS"),
    ("orm.DR_Sqlite", "orm.DRSqlite"),
    ("orm.DR_Postgres", "orm.DRPostgres"),
    ("orm.DR_MySQL", "orm.DRMySQL"),
    ("orm.DR_Oracle", "orm.DROracle"),
    ("orm.Col_Add", "orm.ColAdd"),
    ("orm.Col_Minus", "orm.ColMinus"),
    ("orm.Col_Multiply", "orm.ColMultiply"),
    ("orm.Col_Except", "orm.ColExcept"),
    ("GenerateOperatorSql", "GenerateOperatorSQL"),
    ("OperatorSql", "OperatorSQL"),
    ("orm.Debug_Queries", "orm.DebugQueries"),
    ("orm.COMMA_SPACE", "orm.CommaSpace"),
    (".SendOut()", ".DoRequest()"),
    ("validation.ValidationError", "validation.Error"),
];

/// `Input.Request` is renamed wholesale above, which also catches
/// `Input.RequestBody`. This puts the body accessor back.
pub const CORRECTIONS: &[(&str, &str)] = &[("Input.Context.RequestBody", "Input.RequestBody")];

/// Key renames for `.conf` files, applied one after another.
pub const CONF_RENAMES: &[(&str, &str)] = &[
    ("HttpCertFile", "HTTPSCertFile"),
    ("HttpKeyFile", "HTTPSKeyFile"),
    ("EnableHttpListen", "HTTPEnable"),
    ("EnableHttpTLS", "EnableHTTPS"),
    ("IZIGoServerName", "ServerName"),
    ("AdminHttpAddr", "AdminAddr"),
    ("AdminHttpPort", "AdminPort"),
    ("HttpServerTimeOut", "ServerTimeOut"),
];

/// Renames for the generated `docs.go`.
pub const DOCS_RENAMES: &[(&str, &str)] = &[("v.Apis", "v.APIs")];

/// Exact-text find/replace pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralRule {
    pub from: String,
    pub to: String,
}

impl LiteralRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Regex find/replace. The template refers to capture groups as `${n}`.
///
/// Patterns run against raw file bytes. The upgrade rules use `(?-u)` so
/// `.` matches any byte but `\n` and `\s` is ASCII whitespace only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRule {
    pub pattern: String,
    pub template: String,
}

impl PatternRule {
    pub fn new(pattern: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            template: template.into(),
        }
    }
}

/// A pattern rule restricted to source files of one extension.
///
/// Output of the rule refers to `import`, so whenever it fires the file's
/// import block must contain that package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRule {
    pub rule: PatternRule,
    pub extension: String,
    pub import: String,
}

/// Which files a [`ScopedRules`] group applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileScope {
    /// Files with exactly this name.
    FileName(String),
    /// Files with this extension (without the leading dot).
    Extension(String),
}

impl FileScope {
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            FileScope::FileName(name) => path.file_name().map_or(false, |n| n == name.as_str()),
            FileScope::Extension(ext) => path.extension().map_or(false, |e| e == ext.as_str()),
        }
    }
}

/// Literal renames applied in sequence to files matching `scope`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedRules {
    pub scope: FileScope,
    pub rules: Vec<LiteralRule>,
}

/// Everything the rewrite pipeline applies, in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    /// Applied as one simultaneous pass; earlier entries win ties.
    pub literals: Vec<LiteralRule>,
    /// Applied one by one after the literal pass.
    pub corrections: Vec<LiteralRule>,
    /// Applied in order; each sees the output of the previous one.
    pub patterns: Vec<PatternRule>,
    pub source_rules: Vec<SourceRule>,
    pub scoped: Vec<ScopedRules>,
}

impl RuleSet {
    /// The rule set that upgrades an application to IZIGo 1.6+.
    pub fn upgrade() -> Self {
        Self {
            literals: literal_rules(UPGRADE_RULES),
            corrections: literal_rules(CORRECTIONS),
            patterns: vec![
                PatternRule::new(r#"(?-u)(Input.Params\[")(.*)("\])"#, r#"Input.Param("${2}")"#),
                // Assignment first: it is a superset of the plain read below.
                PatternRule::new(
                    r#"(?-u)(Input.Data\[")(.*)("\])(\s)(=)(\s)(.*)"#,
                    r#"Input.SetData("${2}", ${7})"#,
                ),
                PatternRule::new(r#"(?-u)(Input.Data\[")(.*)("\])"#, r#"Input.Data("${2}")"#),
            ],
            source_rules: vec![SourceRule {
                // Cache Put with a bare duration; `*` or `.` in the last
                // argument means it is already scaled or a field access.
                rule: PatternRule::new(
                    r#"(?-u)(\.Put\(")(.*)(",)(\s)(.*)(,\s*)([^\*.]*)(\))"#,
                    r#".Put("${2}", ${5}, ${7}*time.Second)"#,
                ),
                extension: "go".into(),
                import: "time".into(),
            }],
            scoped: vec![
                ScopedRules {
                    scope: FileScope::FileName("docs.go".into()),
                    rules: literal_rules(DOCS_RENAMES),
                },
                ScopedRules {
                    scope: FileScope::Extension("conf".into()),
                    rules: literal_rules(CONF_RENAMES),
                },
            ],
        }
    }
}

fn literal_rules(table: &[(&str, &str)]) -> Vec<LiteralRule> {
    table
        .iter()
        .map(|(from, to)| LiteralRule::new(*from, *to))
        .collect()
}
