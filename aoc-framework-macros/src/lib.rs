//! Procedural macros for the `aoc-framework` crate.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::parse::Parse;
use syn::{Error, Expr, Item, ItemImpl, ItemStruct, Type, parse_macro_input};

/// Procedural macro attribute that generates a `SolutionRunner` implementation.
///
/// The generated `run` parses the input with `parsed`, then solves both parts through
/// `aoc_framework::runner::solve_parsed_full_solution`.
///
/// # Properties
///
/// - `name` (required): An expression that evaluates to `&str`, the day's display name.
///   Can be a string literal or a constant.
///
/// - `parsed` (required): A type that implements `ParseData`, used to parse input once before
///   both parts borrow it.
///
/// - `part_one` (required): The type implementing `Solution<PartOne>` for solving part one.
///
/// - `part_two` (required): The type implementing `Solution<PartTwo>` for solving part two.
///
/// # Errors
///
/// Returns a compile error if:
/// - Applied to anything other than a struct or impl block
/// - Any property is missing
/// - Any property is specified more than once
/// - An unsupported property is provided
///
/// # Examples
///
/// With a struct `Seats` implementing `ParseData` and a struct `Day05` implementing both
/// `Solution<PartOne>` & `Solution<PartTwo>`, registered on a day-indexed struct:
///
/// ```ignore
/// #[solution_runner(name = "Day 5: Binary Boarding", parsed = Seats, part_one = Day05, part_two = Day05)]
/// impl AdventOfCode2020<5> {}
/// ```
#[proc_macro_attribute]
pub fn solution_runner(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut properties = RunnerProperties::default();
    let solution_runner_parser = syn::meta::parser(|meta| properties.parse_property(&meta));
    parse_macro_input!(args with solution_runner_parser);

    let solve_function_call = match properties.solve_function_call() {
        Ok(tokens) => tokens,
        Err(error) => return error.to_compile_error().into(),
    };

    let original_input = proc_macro2::TokenStream::from(input.clone());
    let item = parse_macro_input!(input as Item);

    let self_ty = match item {
        Item::Struct(ItemStruct { ident, .. }) => quote! { #ident },
        Item::Impl(ItemImpl { self_ty, .. }) => quote! { #self_ty },
        _ => {
            return Error::new(
                Span::call_site(),
                "the #[solution_runner] macro can only be applied to a struct or an impl block",
            )
            .to_compile_error()
            .into();
        }
    };

    TokenStream::from(quote! {
        #original_input

        impl aoc_framework::runner::SolutionRunner for #self_ty {
            fn run(
                input: &str,
                handler: &mut dyn aoc_framework::runner::OutputHandler,
                timed: bool
            ) -> aoc_framework::DynamicResult<()> {
                #solve_function_call
            }
        }
    })
}

/// Properties collected from the attribute arguments.
#[derive(Default)]
struct RunnerProperties {
    /// The expression to use as a solution name; should resolve to string slice.
    name: Option<Expr>,
    /// The type to use for a `ParseData` generic parameter.
    parsed: Option<Type>,
    /// The type to use for a `Solution<PartOne>` generic parameter.
    part_one: Option<Type>,
    /// The type to use for a `Solution<PartTwo>` generic parameter.
    part_two: Option<Type>,
}

/// Parse a property's value into `slot`, rejecting a second occurrence of the property.
fn set_once<T: Parse>(
    slot: &mut Option<T>,
    meta: &ParseNestedMeta,
    property: &str,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate '{property}' property")));
    }
    *slot = Some(meta.value()?.parse()?);
    Ok(())
}

/// Take a required property, or produce the error to report when it was never given.
fn required<T>(slot: Option<T>, property: &str) -> syn::Result<T> {
    slot.ok_or_else(|| {
        Error::new(
            Span::call_site(),
            format!("missing required property: '{property}'"),
        )
    })
}

impl RunnerProperties {
    fn parse_property(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            set_once(&mut self.name, meta, "name")
        } else if meta.path.is_ident("parsed") {
            set_once(&mut self.parsed, meta, "parsed")
        } else if meta.path.is_ident("part_one") {
            set_once(&mut self.part_one, meta, "part_one")
        } else if meta.path.is_ident("part_two") {
            set_once(&mut self.part_two, meta, "part_two")
        } else {
            Err(meta.error("unsupported solution runner property"))
        }
    }

    /// Build the call to the runner function from the given properties.
    fn solve_function_call(self) -> syn::Result<proc_macro2::TokenStream> {
        let name_expr = required(self.name, "name")?;
        let parsed_ty = required(self.parsed, "parsed")?;
        let part_one_ty = required(self.part_one, "part_one")?;
        let part_two_ty = required(self.part_two, "part_two")?;

        Ok(quote! {
            aoc_framework::runner::solve_parsed_full_solution::<
                #parsed_ty,
                #part_one_ty,
                #part_two_ty
            >(#name_expr, input, handler, timed)
        })
    }
}
