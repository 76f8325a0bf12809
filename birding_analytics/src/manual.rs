/*!

This is the long-form manual for `birding_analytics` and `birdtally`.

## What is computed

For every county present in a sighting export, the three dates with the most
distinct species. Sightings are grouped by state, county and date. Within one
group a species is counted once, however many checklists reported it.

Rows without a county are ignored. eBird state codes of the 50 US states
(`US-TX`) are replaced with the state name (`Texas`); other region codes are kept
as they are.

## Input format

An eBird "Download My Data" export, as a CSV file with a header row:

```text
Submission ID,Common Name,Scientific Name,Taxonomic Order,Count,State/Province,County,Location,Date
S1,Northern Cardinal,Cardinalis cardinalis,30000,2,US-TX,Travis,Lake Walter E. Long,2024-01-01
S1,Carolina Wren,Thryothorus ludovicianus,26000,1,US-TX,Travis,Lake Walter E. Long,2024-01-01
```

Only four columns are read, by their header name: `County`, `Date`,
`Taxonomic Order` and `State/Province`. The other columns are ignored and the
order of the columns does not matter.

Only files declared as CSV are accepted. The declared type is the extension of
the file, unless `--input-type` is given.

## Browsing the results

* `--sort county` (default) lists the counties alphabetically, each with its
  three best dates.
* `--sort date` lists the counties by their best single day, most species first.
  Each county is shown with that day only.
* `--search <text>` keeps the counties whose name contains the text (ignoring
  case). Only the county name is searched.
* `--state <name>` keeps the counties of one state. The name is the full state
  name as displayed (`Texas`), `All` disables the filter.

## Configuration

All the options can also be given in a JSON file passed with `--config`. The
values on the command line take precedence.

```text
{
  "outputSettings": { "reportName": "Spring 2024", "outputDirectory": "out" },
  "fileSource": {
    "provider": "ebird",
    "filePath": "MyEBirdData.csv",
    "countyColumn": "County",
    "dateColumn": "Date",
    "speciesColumn": "Taxonomic Order",
    "stateColumn": "State/Province"
  },
  "view": { "sortBy": "date", "searchTerm": "", "selectedState": "All" }
}
```

`filePath` is relative to the directory of the configuration file. The column
settings are optional and default to the eBird header names.

## Output

Without `--out`, the visible counties are printed as text. With `--out`, a JSON
summary is written to the given file (or to the standard output with
`--out stdout`):

```text
{
  "config": { "report": "Spring 2024", "file": "MyEBirdData.csv", "sortBy": "date", ... },
  "rowsRead": 3,
  "rowsSkipped": 0,
  "rowsMalformed": 0,
  "states": ["All", "Texas"],
  "results": [
    { "state": "Texas", "county": "Travis",
      "dates": [ { "date": "2024-01-01", "speciesCount": 2 } ] }
  ]
}
```

`--reference <file>` compares that summary with a previously generated one and
fails if they differ.

 */
