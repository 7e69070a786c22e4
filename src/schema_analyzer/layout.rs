use crate::types::{Column, EnumType, Schema, Table};

/// Spaces added after every padded field
pub const COLUMN_GAP: usize = 2;
/// Appended to the name of a nullable column
pub const NULLABLE_MARKER: &str = "?";
/// Label in front of a default value, separator included
pub const DEFAULT_KEYWORD: &str = "default ";
/// Indentation of lines inside a block
pub const INDENT: &str = "  ";

/// Length of `text` in display units
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Semantic class of a lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    TableName,
    EnumName,
    ColumnName,
    NullableMarker,
    DataType,
    EnumLabel,
    Property,
    DefaultValue,
    Reference,
    Rule,
    Punctuation,
    Comment,
    /// Separator text that is never decorated
    Text,
}

impl TokenKind {
    /// CSS class used by the decorated renderer
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::TableName => "table-name",
            Self::EnumName => "enum-name",
            Self::ColumnName => "column-name",
            Self::NullableMarker => "nullable",
            Self::DataType => "data-type",
            Self::EnumLabel => "enum-label",
            Self::Property => "property",
            Self::DefaultValue => "default-value",
            Self::Reference => "reference",
            Self::Rule => "rule",
            Self::Punctuation => "punctuation",
            Self::Comment => "comment",
            Self::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Tooltip shown in decorated output
    pub title: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn space() -> Self {
        Self::new(TokenKind::Text, " ")
    }
}

/// A run of tokens, optionally right-padded with spaces to a fixed width.
///
/// Segments without a width are followed by a single space unless they end
/// the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub tokens: Vec<Token>,
    pub width: Option<usize>,
}

impl Segment {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, width: None }
    }

    pub fn padded(tokens: Vec<Token>, width: usize) -> Self {
        Self {
            tokens,
            width: Some(width),
        }
    }

    /// Undecorated length of the segment's tokens
    pub fn text_width(&self) -> usize {
        self.tokens.iter().map(|t| text_width(&t.text)).sum()
    }

    /// Number of spaces needed to reach the segment's width
    pub fn padding(&self) -> usize {
        self.width
            .map(|w| w.saturating_sub(self.text_width()))
            .unwrap_or(0)
    }
}

/// A line inside a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Segments(Vec<Segment>),
    /// Free text to be wrapped into comment lines
    Comment(String),
}

/// One enum or table, ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub name: String,
    pub header: Vec<Segment>,
    pub lines: Vec<Line>,
    pub footer: Vec<Segment>,
}

/// Global alignment widths shared by every table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutMetrics {
    /// Longest column name, nullability marker included
    pub name_width: usize,
    /// Longest displayed type
    pub type_width: usize,
    /// Longest default clause, keyword included; zero without defaults
    pub default_width: usize,
}

impl LayoutMetrics {
    pub fn compute(schema: &Schema) -> Self {
        schema.columns().fold(Self::default(), |metrics, column| Self {
            name_width: metrics.name_width.max(name_width(column)),
            type_width: metrics.type_width.max(text_width(&column.data_type)),
            default_width: metrics.default_width.max(default_width(column)),
        })
    }
}

fn name_width(column: &Column) -> usize {
    let marker = if column.nullable { text_width(NULLABLE_MARKER) } else { 0 };
    text_width(&column.name) + marker
}

fn default_width(column: &Column) -> usize {
    column
        .default_value
        .as_deref()
        .map(|value| text_width(DEFAULT_KEYWORD) + text_width(value))
        .unwrap_or(0)
}

/// Turns schema entities into aligned blocks
pub struct LayoutEngine {
    metrics: LayoutMetrics,
}

impl LayoutEngine {
    pub fn new(schema: &Schema) -> Self {
        Self::with_metrics(LayoutMetrics::compute(schema))
    }

    pub fn with_metrics(metrics: LayoutMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    pub fn enum_block(&self, enum_type: &EnumType) -> Block {
        let comment = if enum_type.referenced_by.is_empty() {
            "Not referenced by any table".to_string()
        } else {
            let tables: Vec<&str> = enum_type.referenced_by.iter().map(String::as_str).collect();
            format!("Referenced by: {}", tables.join(", "))
        };

        let mut lines = vec![Line::Comment(comment)];
        lines.extend(enum_type.labels.iter().map(|label| {
            Line::Segments(vec![Segment::new(vec![Token::new(TokenKind::EnumLabel, label.as_str())])])
        }));

        Block {
            name: enum_type.name.clone(),
            header: block_header("enum", TokenKind::EnumName, &enum_type.name),
            lines,
            footer: block_footer(),
        }
    }

    pub fn table_block(&self, table: &Table) -> Block {
        Block {
            name: table.name.clone(),
            header: block_header("table", TokenKind::TableName, &table.name),
            lines: table.columns.iter().map(|c| self.column_line(c)).collect(),
            footer: block_footer(),
        }
    }

    /// Name, type and default fields are padded to the global widths; the
    /// default field is padded even when the column has no default.
    pub fn column_line(&self, column: &Column) -> Line {
        let mut name = vec![Token::new(TokenKind::ColumnName, column.name.as_str())];
        if column.nullable {
            name.push(Token::new(TokenKind::NullableMarker, NULLABLE_MARKER).with_title("nullable"));
        }

        let mut data_type = Token::new(TokenKind::DataType, column.data_type.as_str());
        if column.is_enum {
            data_type = data_type.with_title("enum");
        }

        let mut segments = vec![
            Segment::padded(name, self.metrics.name_width + COLUMN_GAP),
            Segment::padded(vec![data_type], self.metrics.type_width + COLUMN_GAP),
        ];

        if self.metrics.default_width > 0 {
            let tokens = match &column.default_value {
                Some(value) => vec![
                    Token::new(TokenKind::Property, DEFAULT_KEYWORD),
                    Token::new(TokenKind::DefaultValue, value.as_str()),
                ],
                None => Vec::new(),
            };
            segments.push(Segment::padded(tokens, self.metrics.default_width + COLUMN_GAP));
        }

        if let Some(fk) = &column.foreign_key {
            segments.push(Segment::new(vec![
                Token::new(TokenKind::Property, "references"),
                Token::space(),
                Token::new(TokenKind::Reference, fk.table.as_str()),
                Token::new(TokenKind::Punctuation, "("),
                Token::new(TokenKind::Reference, fk.column.as_str()),
                Token::new(TokenKind::Punctuation, ")"),
            ]));
            if !fk.on_delete.is_no_op() {
                segments.push(rule_segment("on delete", &fk.on_delete.to_string()));
            }
            if !fk.on_update.is_no_op() {
                segments.push(rule_segment("on update", &fk.on_update.to_string()));
            }
        }

        Line::Segments(segments)
    }
}

fn block_header(keyword: &str, kind: TokenKind, name: &str) -> Vec<Segment> {
    vec![
        Segment::new(vec![Token::new(TokenKind::Keyword, keyword)]),
        Segment::new(vec![Token::new(kind, name)]),
        Segment::new(vec![Token::new(TokenKind::Punctuation, "{")]),
    ]
}

fn block_footer() -> Vec<Segment> {
    vec![Segment::new(vec![Token::new(TokenKind::Punctuation, "}")])]
}

fn rule_segment(label: &str, rule: &str) -> Segment {
    Segment::new(vec![
        Token::new(TokenKind::Property, label),
        Token::space(),
        Token::new(TokenKind::Rule, rule),
    ])
}
